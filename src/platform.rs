/// The host browser as an injected, async collaborator
///
/// Each method wraps one callback-style extension API call and resolves to a
/// `Result`, so the manager and dispatcher can use plain `.await` flow.

use crate::error::Result;
use crate::tab_data::{PageContent, TabInfo};
use async_trait::async_trait;

#[async_trait(?Send)]
pub trait BrowserPlatform {
    /// Every open tab in every window, in the order the browser reports them
    async fn list_tabs(&self) -> Result<Vec<TabInfo>>;

    /// The focused tab of the focused window, if any
    async fn active_tab(&self) -> Result<Option<TabInfo>>;

    async fn get_tab(&self, tab_id: i32) -> Result<TabInfo>;

    async fn close_tab(&self, tab_id: i32) -> Result<()>;

    /// Activate the tab and raise its window
    async fn focus_tab(&self, tab_id: i32, window_id: i32) -> Result<()>;

    async fn set_pinned(&self, tab_id: i32, pinned: bool) -> Result<()>;

    async fn move_to_new_window(&self, tab_id: i32) -> Result<()>;

    /// Move the tab to the end of an existing window
    async fn move_to_window(&self, tab_id: i32, window_id: i32) -> Result<()>;

    /// Open one new window holding exactly these URLs, in order. Returns the window id.
    async fn create_window(&self, urls: &[String]) -> Result<i32>;

    /// Returns the new folder's bookmark id
    async fn create_bookmark_folder(&self, title: &str) -> Result<String>;

    async fn create_bookmark(&self, parent_id: &str, title: &str, url: &str) -> Result<()>;

    /// Run the extraction function inside the page. `Ok(None)` means the
    /// injection produced no result.
    async fn inject_page_content(&self, tab_id: i32) -> Result<Option<PageContent>>;

    /// Current time as an ISO-8601 string
    fn now_iso(&self) -> String;
}
