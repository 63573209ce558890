/// Background message dispatcher: one typed request in, one envelope out
///
/// Wire format of a request is `{ "type": "SAVE_TABS_TO_FOLDER", ...payload }`
/// with camelCase payload fields. Every request, including ones with an unknown
/// `type`, is answered with exactly one [`Response`].

use crate::error::Result;
use crate::extraction::extract_active_tab_content;
use crate::manager::{TabAction, TabManager};
use crate::platform::BrowserPlatform;
use crate::storage::KeyValueStore;
use crate::tab_data::TabSnapshot;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    GetTabs,
    #[serde(rename_all = "camelCase")]
    ManageTab {
        action: TabAction,
        tab_id: i32,
        #[serde(default)]
        window_id: Option<i32>,
    },
    GetTabHistory,
    GetTabFolders,
    #[serde(rename_all = "camelCase")]
    SaveTabsToFolder {
        folder_name: String,
        tabs: Vec<TabSnapshot>,
    },
    #[serde(rename_all = "camelCase")]
    OpenTabsFromFolder { folder_name: String },
    BookmarkAll,
    SaveSession,
    RestoreSession {
        #[serde(default)]
        timestamp: Option<String>,
    },
    GetTabContent,
    GetSavedSessions,
}

impl Request {
    pub fn kind(&self) -> &'static str {
        match self {
            Request::GetTabs => "GET_TABS",
            Request::ManageTab { .. } => "MANAGE_TAB",
            Request::GetTabHistory => "GET_TAB_HISTORY",
            Request::GetTabFolders => "GET_TAB_FOLDERS",
            Request::SaveTabsToFolder { .. } => "SAVE_TABS_TO_FOLDER",
            Request::OpenTabsFromFolder { .. } => "OPEN_TABS_FROM_FOLDER",
            Request::BookmarkAll => "BOOKMARK_ALL",
            Request::SaveSession => "SAVE_SESSION",
            Request::RestoreSession { .. } => "RESTORE_SESSION",
            Request::GetTabContent => "GET_TAB_CONTENT",
            Request::GetSavedSessions => "GET_SAVED_SESSIONS",
        }
    }

    /// Parse a raw message, answering unknown or malformed ones directly
    pub fn parse(raw: Value) -> std::result::Result<Request, Response> {
        let kind = match raw.get("type").and_then(Value::as_str) {
            Some(kind) => kind.to_string(),
            None => return Err(Response::failure("request has no type")),
        };

        if !Request::is_known_type(&kind) {
            warn!("Unsupported request type: {}", kind);
            return Err(Response::failure(format!("unsupported request type: {}", kind)));
        }

        serde_json::from_value(raw).map_err(|e| Response::failure(format!("invalid request: {}", e)))
    }

    /// Whether serde recognises `kind` as a tag. A bare `{ "type": kind }` can
    /// only fail on the tag itself or on a missing payload field.
    fn is_known_type(kind: &str) -> bool {
        match serde_json::from_value::<Request>(serde_json::json!({ "type": kind })) {
            Ok(_) => true,
            Err(e) => !e.to_string().starts_with("unknown variant"),
        }
    }
}

/// Uniform reply envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok(data: Option<Value>) -> Response {
        Response {
            success: true,
            data,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Response {
        Response {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Decode `data` into a typed payload (used by the popup side)
    pub fn into_data<T: serde::de::DeserializeOwned>(self) -> std::result::Result<T, String> {
        if !self.success {
            return Err(self.error.unwrap_or_else(|| "request failed".to_string()));
        }
        serde_json::from_value(self.data.unwrap_or(Value::Null)).map_err(|e| e.to_string())
    }
}

pub struct Dispatcher<S, P> {
    manager: TabManager<S, P>,
}

impl<S: KeyValueStore, P: BrowserPlatform> Dispatcher<S, P> {
    pub fn new(manager: TabManager<S, P>) -> Self {
        Dispatcher { manager }
    }

    pub fn manager(&self) -> &TabManager<S, P> {
        &self.manager
    }

    pub async fn dispatch_value(&self, raw: Value) -> Response {
        match Request::parse(raw) {
            Ok(request) => self.dispatch(request).await,
            Err(response) => response,
        }
    }

    pub async fn dispatch(&self, request: Request) -> Response {
        let kind = request.kind();
        debug!("Dispatching {}", kind);

        match self.handle(request).await {
            Ok(data) => Response::ok(data),
            Err(e) => {
                error!("{} failed: {}", kind, e);
                Response::failure(e.to_string())
            }
        }
    }

    async fn handle(&self, request: Request) -> Result<Option<Value>> {
        let manager = &self.manager;

        let data = match request {
            Request::GetTabs => Some(serde_json::to_value(manager.open_tabs().await?)?),
            Request::ManageTab {
                action,
                tab_id,
                window_id,
            } => {
                manager.manage_tab(action, tab_id, window_id).await?;
                None
            }
            Request::GetTabHistory => Some(serde_json::to_value(manager.history().await?)?),
            Request::GetTabFolders => Some(serde_json::to_value(manager.folders().await?)?),
            Request::GetSavedSessions => Some(serde_json::to_value(manager.saved_sessions().await?)?),
            Request::SaveTabsToFolder { folder_name, tabs } => {
                manager.save_tabs_to_folder(&folder_name, tabs).await?;
                None
            }
            Request::OpenTabsFromFolder { folder_name } => {
                manager.open_tabs_from_folder(&folder_name).await?;
                None
            }
            Request::BookmarkAll => Some(serde_json::to_value(manager.bookmark_all_tabs().await?)?),
            Request::SaveSession => Some(serde_json::to_value(manager.save_session().await?)?),
            Request::RestoreSession { timestamp } => {
                let restored = manager.restore_session(timestamp.as_deref()).await?;
                Some(serde_json::json!({ "restored": restored }))
            }
            Request::GetTabContent => {
                let content = extract_active_tab_content(manager.platform()).await?;
                Some(serde_json::to_value(content)?)
            }
        };

        Ok(data)
    }
}
