/// Bindings to the Chrome extension runtime (wasm32 only at run time)

pub mod background;
pub mod bridge;
pub mod messaging;
pub mod platform;
pub mod store;
