/// Background service worker: message listener and periodic history capture
///
/// Both listeners are registered synchronously in `start` so that a worker
/// woken by a message or an alarm finds them in place.

use super::bridge::{createAlarm, from_js, js_error_message, onAlarm, onMessage, to_js};
use super::platform::ChromePlatform;
use super::store::BrowserStore;
use crate::config::ManagerConfig;
use crate::dispatcher::{Dispatcher, Response};
use crate::manager::TabManager;
use log::{debug, error, info};
use serde_json::Value;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

pub type BackgroundDispatcher = Dispatcher<BrowserStore, ChromePlatform>;

pub const HISTORY_ALARM: &str = "tabHistorySnapshot";

pub fn start(config: ManagerConfig) {
    let period_minutes = config.history_period_minutes();
    let manager = TabManager::new(BrowserStore::detect(), ChromePlatform, config);
    let dispatcher = Rc::new(Dispatcher::new(manager));

    register_listener(dispatcher.clone());
    start_history_alarm(dispatcher, period_minutes);

    info!("Background started");
}

fn register_listener(dispatcher: Rc<BackgroundDispatcher>) {
    let handler = Closure::<dyn Fn(JsValue) -> js_sys::Promise>::new(move |request: JsValue| {
        let dispatcher = dispatcher.clone();
        future_to_promise(async move {
            let response = match from_js::<Value>(request) {
                Ok(raw) => dispatcher.dispatch_value(raw).await,
                Err(e) => Response::failure(e.to_string()),
            };
            to_js(&response).map_err(|e| JsValue::from_str(&e.to_string()))
        })
    });

    onMessage(handler.as_ref().unchecked_ref());
    // The listener lives as long as the service worker
    handler.forget();
}

fn start_history_alarm(dispatcher: Rc<BackgroundDispatcher>, period_minutes: f64) {
    let tick = Closure::<dyn Fn()>::new(move || {
        let dispatcher = dispatcher.clone();
        spawn_local(async move {
            debug!("History alarm fired");
            if let Err(e) = dispatcher.manager().record_history_snapshot().await {
                error!("History snapshot failed: {}", e);
            }
        });
    });

    onAlarm(HISTORY_ALARM, tick.as_ref().unchecked_ref());
    tick.forget();

    spawn_local(async move {
        match createAlarm(HISTORY_ALARM, period_minutes).await {
            Ok(()) => info!("History alarm every {} min", period_minutes),
            Err(e) => error!("Failed to schedule history alarm: {}", js_error_message(&e)),
        }
    });
}
