/// Raw imports from `js/bridge.js` plus JS <-> serde conversion helpers

use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    pub async fn queryTabs(query: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn getTab(tab_id: i32) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn removeTab(tab_id: i32) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn updateTab(tab_id: i32, props: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn moveTab(tab_id: i32, props: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn updateWindow(window_id: i32, props: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn createWindow(props: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn createBookmark(props: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn executeScript(tab_id: i32) -> std::result::Result<JsValue, JsValue>;

    pub fn hasExtensionStorage() -> bool;

    #[wasm_bindgen(catch)]
    pub async fn getStorage(key: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn setStorage(key: &str, value: JsValue) -> std::result::Result<(), JsValue>;

    pub fn onMessage(handler: &js_sys::Function);

    #[wasm_bindgen(catch)]
    pub async fn createAlarm(name: &str, period_in_minutes: f64) -> std::result::Result<(), JsValue>;

    pub fn onAlarm(name: &str, callback: &js_sys::Function);

    #[wasm_bindgen(catch)]
    pub async fn sendMessage(request: JsValue) -> std::result::Result<JsValue, JsValue>;
}

/// Best-effort readable message from a rejected promise
pub fn js_error_message(error: &JsValue) -> String {
    if let Some(message) = error.as_string() {
        return message;
    }
    match error.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{:?}", error),
    }
}

pub fn platform_error(error: JsValue) -> Error {
    Error::platform(js_error_message(&error))
}

/// Serialize as plain JS objects (maps become objects, not `Map`s)
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| Error::platform(format!("Failed to serialize: {}", e)))
}

pub fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| Error::platform(format!("Failed to parse: {}", e)))
}
