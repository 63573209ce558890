/// In-memory browser used by the unit tests

use crate::error::{Error, Result};
use crate::platform::BrowserPlatform;
use crate::tab_data::{PageContent, TabInfo};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};

#[derive(Debug, Clone)]
pub enum Injection {
    Content(PageContent),
    NoResult,
    Denied(String),
}

pub struct FakeBrowser {
    pub tabs: RefCell<Vec<TabInfo>>,
    pub windows: RefCell<Vec<Vec<String>>>,
    pub bookmark_folders: RefCell<Vec<String>>,
    /// (parent id, title, url)
    pub bookmarks: RefCell<Vec<(String, String, String)>>,
    /// URLs whose `create_bookmark` call is rejected
    pub reject_bookmarks: RefCell<Vec<String>>,
    pub focused: RefCell<Vec<(i32, i32)>>,
    pub injection: RefCell<Injection>,
    /// Makes every `tabs.query` (list and active tab) reject
    pub fail_list_tabs: Cell<bool>,
    next_id: Cell<i32>,
    clock: Cell<u32>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        FakeBrowser {
            tabs: RefCell::new(Vec::new()),
            windows: RefCell::new(Vec::new()),
            bookmark_folders: RefCell::new(Vec::new()),
            bookmarks: RefCell::new(Vec::new()),
            reject_bookmarks: RefCell::new(Vec::new()),
            focused: RefCell::new(Vec::new()),
            injection: RefCell::new(Injection::NoResult),
            fail_list_tabs: Cell::new(false),
            next_id: Cell::new(1),
            clock: Cell::new(0),
        }
    }

    /// Tabs open in window 1; the first one is active
    pub fn with_urls(urls: &[&str]) -> Self {
        let browser = FakeBrowser::new();
        for url in urls {
            browser.open_tab(url);
        }
        browser
    }

    pub fn open_tab(&self, url: &str) -> i32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let active = self.tabs.borrow().is_empty();
        self.tabs.borrow_mut().push(TabInfo {
            id,
            window_id: 1,
            title: format!("Tab {}", id),
            url: url.to_string(),
            fav_icon_url: None,
            active,
            pinned: false,
        });
        id
    }

    pub fn tab(&self, tab_id: i32) -> Option<TabInfo> {
        self.tabs.borrow().iter().find(|t| t.id == tab_id).cloned()
    }

    pub fn windows_created(&self) -> Vec<Vec<String>> {
        self.windows.borrow().clone()
    }

    fn with_tab<R>(&self, tab_id: i32, f: impl FnOnce(&mut TabInfo) -> R) -> Result<R> {
        let mut tabs = self.tabs.borrow_mut();
        tabs.iter_mut()
            .find(|t| t.id == tab_id)
            .map(f)
            .ok_or_else(|| Error::platform(format!("No tab with id: {}", tab_id)))
    }
}

#[async_trait(?Send)]
impl BrowserPlatform for FakeBrowser {
    async fn list_tabs(&self) -> Result<Vec<TabInfo>> {
        if self.fail_list_tabs.get() {
            return Err(Error::platform("tabs.query rejected"));
        }
        Ok(self.tabs.borrow().clone())
    }

    async fn active_tab(&self) -> Result<Option<TabInfo>> {
        if self.fail_list_tabs.get() {
            return Err(Error::platform("tabs.query rejected"));
        }
        Ok(self.tabs.borrow().iter().find(|t| t.active).cloned())
    }

    async fn get_tab(&self, tab_id: i32) -> Result<TabInfo> {
        self.with_tab(tab_id, |tab| tab.clone())
    }

    async fn close_tab(&self, tab_id: i32) -> Result<()> {
        self.with_tab(tab_id, |_| ())?;
        self.tabs.borrow_mut().retain(|t| t.id != tab_id);
        Ok(())
    }

    async fn focus_tab(&self, tab_id: i32, window_id: i32) -> Result<()> {
        self.with_tab(tab_id, |tab| tab.active = true)?;
        self.focused.borrow_mut().push((tab_id, window_id));
        Ok(())
    }

    async fn set_pinned(&self, tab_id: i32, pinned: bool) -> Result<()> {
        self.with_tab(tab_id, |tab| tab.pinned = pinned)
    }

    async fn move_to_new_window(&self, tab_id: i32) -> Result<()> {
        let window_id = self.windows.borrow().len() as i32 + 100;
        self.windows.borrow_mut().push(Vec::new());
        self.with_tab(tab_id, |tab| tab.window_id = window_id)
    }

    async fn move_to_window(&self, tab_id: i32, window_id: i32) -> Result<()> {
        self.with_tab(tab_id, |tab| tab.window_id = window_id)?;
        let mut tabs = self.tabs.borrow_mut();
        if let Some(pos) = tabs.iter().position(|t| t.id == tab_id) {
            let tab = tabs.remove(pos);
            tabs.push(tab);
        }
        Ok(())
    }

    async fn create_window(&self, urls: &[String]) -> Result<i32> {
        self.windows.borrow_mut().push(urls.to_vec());
        Ok(self.windows.borrow().len() as i32 + 100)
    }

    async fn create_bookmark_folder(&self, title: &str) -> Result<String> {
        self.bookmark_folders.borrow_mut().push(title.to_string());
        Ok(format!("folder-{}", self.bookmark_folders.borrow().len()))
    }

    async fn create_bookmark(&self, parent_id: &str, title: &str, url: &str) -> Result<()> {
        if self.reject_bookmarks.borrow().iter().any(|u| u == url) {
            return Err(Error::platform(format!("Can't bookmark {}", url)));
        }
        self.bookmarks
            .borrow_mut()
            .push((parent_id.to_string(), title.to_string(), url.to_string()));
        Ok(())
    }

    async fn inject_page_content(&self, _tab_id: i32) -> Result<Option<PageContent>> {
        match self.injection.borrow().clone() {
            Injection::Content(content) => Ok(Some(content)),
            Injection::NoResult => Ok(None),
            Injection::Denied(reason) => Err(Error::platform(reason)),
        }
    }

    fn now_iso(&self) -> String {
        let tick = self.clock.get();
        self.clock.set(tick + 1);
        format!(
            "2024-10-28T{:02}:{:02}:{:02}.000Z",
            tick / 3600,
            (tick / 60) % 60,
            tick % 60
        )
    }
}
