/// `BrowserPlatform` over the real chrome.tabs / windows / bookmarks / scripting APIs

use super::bridge::{
    createBookmark, createWindow, executeScript, from_js, getTab, moveTab, platform_error, queryTabs,
    removeTab, to_js, updateTab, updateWindow,
};
use crate::error::Result;
use crate::platform::BrowserPlatform;
use crate::tab_data::{PageContent, TabInfo};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Only the id is read back from windows and bookmark nodes
#[derive(Deserialize)]
struct CreatedWindow {
    id: i32,
}

#[derive(Deserialize)]
struct BookmarkNode {
    id: String,
}

pub struct ChromePlatform;

#[async_trait(?Send)]
impl BrowserPlatform for ChromePlatform {
    async fn list_tabs(&self) -> Result<Vec<TabInfo>> {
        let tabs = queryTabs(to_js(&json!({}))?).await.map_err(platform_error)?;
        from_js(tabs)
    }

    async fn active_tab(&self) -> Result<Option<TabInfo>> {
        let query = to_js(&json!({ "active": true, "currentWindow": true }))?;
        let tabs: Vec<TabInfo> = from_js(queryTabs(query).await.map_err(platform_error)?)?;
        Ok(tabs.into_iter().next())
    }

    async fn get_tab(&self, tab_id: i32) -> Result<TabInfo> {
        from_js(getTab(tab_id).await.map_err(platform_error)?)
    }

    async fn close_tab(&self, tab_id: i32) -> Result<()> {
        removeTab(tab_id).await.map_err(platform_error)
    }

    async fn focus_tab(&self, tab_id: i32, window_id: i32) -> Result<()> {
        updateTab(tab_id, to_js(&json!({ "active": true }))?)
            .await
            .map_err(platform_error)?;
        updateWindow(window_id, to_js(&json!({ "focused": true }))?)
            .await
            .map_err(platform_error)?;
        Ok(())
    }

    async fn set_pinned(&self, tab_id: i32, pinned: bool) -> Result<()> {
        updateTab(tab_id, to_js(&json!({ "pinned": pinned }))?)
            .await
            .map_err(platform_error)?;
        Ok(())
    }

    async fn move_to_new_window(&self, tab_id: i32) -> Result<()> {
        createWindow(to_js(&json!({ "tabId": tab_id }))?)
            .await
            .map_err(platform_error)?;
        Ok(())
    }

    async fn move_to_window(&self, tab_id: i32, window_id: i32) -> Result<()> {
        moveTab(tab_id, to_js(&json!({ "windowId": window_id, "index": -1 }))?)
            .await
            .map_err(platform_error)?;
        Ok(())
    }

    async fn create_window(&self, urls: &[String]) -> Result<i32> {
        let window = createWindow(to_js(&json!({ "url": urls }))?)
            .await
            .map_err(platform_error)?;
        let window: CreatedWindow = from_js(window)?;
        Ok(window.id)
    }

    async fn create_bookmark_folder(&self, title: &str) -> Result<String> {
        let node = createBookmark(to_js(&json!({ "title": title }))?)
            .await
            .map_err(platform_error)?;
        let node: BookmarkNode = from_js(node)?;
        Ok(node.id)
    }

    async fn create_bookmark(&self, parent_id: &str, title: &str, url: &str) -> Result<()> {
        let props = json!({ "parentId": parent_id, "title": title, "url": url });
        createBookmark(to_js(&props)?).await.map_err(platform_error)?;
        Ok(())
    }

    async fn inject_page_content(&self, tab_id: i32) -> Result<Option<PageContent>> {
        let result = executeScript(tab_id).await.map_err(platform_error)?;
        if result.is_null() || result.is_undefined() {
            return Ok(None);
        }
        from_js(result).map(Some)
    }

    fn now_iso(&self) -> String {
        String::from(js_sys::Date::new_0().to_iso_string())
    }
}
