/// REST client for the SemantAI backend
///
/// Thin wrapper over `reqwest` (fetch-backed on wasm32). Every call returns the
/// backend's JSON body decoded into a typed struct; non-2xx statuses become
/// [`Error::Api`] carrying the backend's `error` field, whatever the body is.

pub mod content;
pub mod features;
pub mod files;
pub mod jobs;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard `{ success, data, error, message }` envelope used by most endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// The payload of a successful envelope, or `Rejected` with the backend's reason
    pub fn into_result(self, fallback: &str) -> Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(Error::Rejected {
                message: self
                    .error
                    .or(self.message)
                    .unwrap_or_else(|| fallback.to_string()),
            }),
        }
    }
}

/// Build the error for a non-2xx answer from its decoded body
pub fn api_error(status: u16, body: &Value) -> Error {
    let message = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("An error occurred")
        .to_string();
    Error::Api { status, message }
}

/// Turn a raw answer into the caller's type.
///
/// The status is checked before the body is parsed, so an HTML error page
/// from a proxy still reports its status. An empty body decodes as `null`.
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    let parsed = if body.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Value>(body)
    };

    if !(200..300).contains(&status) {
        return Err(api_error(status, &parsed.unwrap_or(Value::Null)));
    }

    Ok(serde_json::from_value(parsed?)?)
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        ApiClient {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.http.get(self.config.endpoint(path))).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.config.endpoint(path)).json(body)).await
    }

    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        self.send(self.http.post(self.config.endpoint(path)).multipart(form)).await
    }

    /// DELETE whose body, if any, is ignored once the status is 2xx
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let (status, body) = self.send_raw(self.http.delete(self.config.endpoint(path))).await?;
        if !(200..300).contains(&status) {
            let parsed = serde_json::from_str(&body).unwrap_or(Value::Null);
            return Err(api_error(status, &parsed));
        }
        Ok(())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let (status, body) = self.send_raw(request).await?;
        decode_body(status, &body)
    }

    async fn send_raw(&self, request: RequestBuilder) -> Result<(u16, String)> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        debug!("{} {}", status, response.url());

        Ok((status, response.text().await?))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        ApiClient::new(ApiConfig::default())
    }
}
