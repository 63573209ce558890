/// SemantAI Tabs - Chrome extension for tab history, sessions, folders and page capture
/// Built with Rust + WASM + Yew

pub mod api;
pub mod chrome;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod extraction;
pub mod manager;
pub mod operations;
pub mod platform;
pub mod snapshot;
pub mod storage;
pub mod tab_data;
pub mod ui;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Background service worker: message dispatcher + history timer
#[wasm_bindgen]
pub fn start_background() {
    chrome::background::start(config::ManagerConfig::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
