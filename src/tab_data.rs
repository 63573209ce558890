/// Data structures shared by the background manager, the dispatcher and the popup
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A tab as the browser currently reports it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: i32,
    pub window_id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub pinned: bool,
}

/// Lightweight, persisted record of a tab at capture time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub pinned: bool,
}

impl TabSnapshot {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> TabSnapshot {
        TabSnapshot {
            id: None,
            title: title.into(),
            url: url.into(),
            fav_icon_url: None,
            pinned: false,
        }
    }
}

impl From<&TabInfo> for TabSnapshot {
    fn from(tab: &TabInfo) -> Self {
        TabSnapshot {
            id: Some(tab.id),
            title: tab.title.clone(),
            url: tab.url.clone(),
            fav_icon_url: tab.fav_icon_url.clone(),
            pinned: tab.pinned,
        }
    }
}

/// All tabs open at one point in time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    /// ISO-8601, as produced by `Date.prototype.toISOString`
    pub timestamp: String,
    pub tabs: Vec<TabSnapshot>,
}

impl SessionSnapshot {
    pub fn urls(&self) -> Vec<String> {
        self.tabs.iter().map(|t| t.url.clone()).collect()
    }
}

/// Folder name -> tabs saved under it
pub type TabFolders = BTreeMap<String, Vec<TabSnapshot>>;

/// Point-in-time copy of the active page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PageContent {
    pub text: String,
    pub html: String,
    pub title: String,
    pub url: String,
}
