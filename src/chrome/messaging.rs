/// UI side of the message channel: send a request to the background, await its envelope

use super::bridge::{from_js, js_error_message, sendMessage, to_js};
use crate::dispatcher::{Request, Response};
use serde::de::DeserializeOwned;

pub async fn send(request: &Request) -> Result<Response, String> {
    let js_request = to_js(request).map_err(|e| e.to_string())?;
    let reply = sendMessage(js_request)
        .await
        .map_err(|e| format!("{} failed: {}", request.kind(), js_error_message(&e)))?;

    if reply.is_null() || reply.is_undefined() {
        return Err(format!("{}: no response from background", request.kind()));
    }
    from_js(reply).map_err(|e| e.to_string())
}

/// Send and decode the envelope's `data`
pub async fn request<T: DeserializeOwned>(request: Request) -> Result<T, String> {
    send(&request).await?.into_data()
}
