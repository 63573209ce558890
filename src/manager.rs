/// History, session and folder management on top of the storage buckets

use crate::config::ManagerConfig;
use crate::error::{Error, Result};
use crate::platform::BrowserPlatform;
use crate::snapshot::capture_session;
use crate::storage::{Bucket, KeyValueStore, Store};
use crate::tab_data::{SessionSnapshot, TabFolders, TabInfo, TabSnapshot};
use futures_util::future::join_all;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Single-tab control primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TabAction {
    Close,
    Focus,
    Pin,
    MoveToNewWindow,
    MoveToWindow,
}

impl TabAction {
    fn name(self) -> &'static str {
        match self {
            TabAction::Close => "close",
            TabAction::Focus => "focus",
            TabAction::Pin => "pin",
            TabAction::MoveToNewWindow => "moveToNewWindow",
            TabAction::MoveToWindow => "moveToWindow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkSummary {
    pub folder_id: String,
    /// Bookmarks actually created
    pub count: usize,
    /// URLs that were skipped (blank) or rejected by the browser
    #[serde(default)]
    pub failed: Vec<String>,
}

/// Append `snapshot`, keeping only the newest `limit` entries
pub fn push_capped(history: &mut Vec<SessionSnapshot>, snapshot: SessionSnapshot, limit: usize) {
    history.push(snapshot);
    if history.len() > limit {
        let excess = history.len() - limit;
        history.drain(..excess);
    }
}

pub struct TabManager<S, P> {
    store: Store<S>,
    platform: P,
    config: ManagerConfig,
}

impl<S: KeyValueStore, P: BrowserPlatform> TabManager<S, P> {
    pub fn new(store: S, platform: P, config: ManagerConfig) -> Self {
        TabManager {
            store: Store::new(store),
            platform,
            config,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub async fn history(&self) -> Result<Vec<SessionSnapshot>> {
        self.store.load(Bucket::TabHistory).await
    }

    pub async fn folders(&self) -> Result<TabFolders> {
        self.store.load(Bucket::TabFolders).await
    }

    pub async fn saved_sessions(&self) -> Result<Vec<SessionSnapshot>> {
        self.store.load(Bucket::SavedSessions).await
    }

    pub async fn open_tabs(&self) -> Result<Vec<TabInfo>> {
        self.platform.list_tabs().await
    }

    /// Periodic capture into the capped history log
    pub async fn record_history_snapshot(&self) -> Result<SessionSnapshot> {
        let snapshot = capture_session(&self.platform).await?;
        let limit = self.config.history_limit;
        let stored = snapshot.clone();

        let len = self
            .store
            .update(Bucket::TabHistory, |history: &mut Vec<SessionSnapshot>| {
                push_capped(history, stored, limit);
                history.len()
            })
            .await?;

        debug!(
            "Recorded history snapshot {} ({} tabs, {} entries kept)",
            snapshot.timestamp,
            snapshot.tabs.len(),
            len
        );
        Ok(snapshot)
    }

    pub async fn save_session(&self) -> Result<SessionSnapshot> {
        let snapshot = capture_session(&self.platform).await?;
        let stored = snapshot.clone();

        self.store
            .update(Bucket::SavedSessions, |sessions: &mut Vec<SessionSnapshot>| {
                sessions.push(stored);
            })
            .await?;

        info!("Saved session {} with {} tabs", snapshot.timestamp, snapshot.tabs.len());
        Ok(snapshot)
    }

    /// Reopen a saved session in a new window: the exact `timestamp` match, or
    /// the last saved one. Returns `false` when there was nothing to restore.
    pub async fn restore_session(&self, timestamp: Option<&str>) -> Result<bool> {
        let sessions = self.saved_sessions().await?;

        let session = match timestamp {
            Some(ts) => sessions.iter().find(|s| s.timestamp == ts),
            None => sessions.last(),
        };

        let Some(session) = session else {
            warn!("No saved session to restore (requested: {:?})", timestamp);
            return Ok(false);
        };

        self.platform.create_window(&session.urls()).await?;
        info!("Restored session {} ({} tabs)", session.timestamp, session.tabs.len());
        Ok(true)
    }

    /// Create or overwrite a named folder
    pub async fn save_tabs_to_folder(&self, folder_name: &str, tabs: Vec<TabSnapshot>) -> Result<()> {
        let name = folder_name.trim();
        if name.is_empty() {
            return Err(Error::InvalidFolderName {
                name: folder_name.to_string(),
            });
        }

        let count = tabs.len();
        let replaced = self
            .store
            .update(Bucket::TabFolders, |folders: &mut TabFolders| {
                folders.insert(name.to_string(), tabs).is_some()
            })
            .await?;

        info!(
            "{} folder {:?} with {} tabs",
            if replaced { "Replaced" } else { "Created" },
            name,
            count
        );
        Ok(())
    }

    /// Open a folder's tabs in a new window. A missing folder is a silent no-op.
    pub async fn open_tabs_from_folder(&self, folder_name: &str) -> Result<()> {
        let folders = self.folders().await?;

        match folders.get(folder_name.trim()) {
            Some(tabs) => {
                let urls: Vec<String> = tabs.iter().map(|t| t.url.clone()).collect();
                self.platform.create_window(&urls).await?;
                info!("Opened folder {:?} ({} tabs)", folder_name, urls.len());
            }
            None => warn!("Folder {:?} does not exist; nothing opened", folder_name),
        }
        Ok(())
    }

    /// Bookmark every open tab into a new folder named after the current time.
    ///
    /// One failed bookmark does not undo the others; it is listed in `failed`.
    pub async fn bookmark_all_tabs(&self) -> Result<BookmarkSummary> {
        let tabs = self.platform.list_tabs().await?;
        let title = format!("Tabs {}", self.platform.now_iso());
        let folder_id = self.platform.create_bookmark_folder(&title).await?;

        let (bookmarkable, blank): (Vec<&TabInfo>, Vec<&TabInfo>) =
            tabs.iter().partition(|tab| !tab.url.trim().is_empty());
        let mut failed: Vec<String> = blank.iter().map(|tab| tab.url.clone()).collect();

        let requests = bookmarkable
            .iter()
            .map(|tab| self.platform.create_bookmark(&folder_id, &tab.title, &tab.url));
        let results = join_all(requests).await;

        let mut count = 0;
        for (tab, result) in bookmarkable.iter().zip(results) {
            match result {
                Ok(()) => count += 1,
                Err(e) => {
                    warn!("Could not bookmark {:?}: {}", tab.url, e);
                    failed.push(tab.url.clone());
                }
            }
        }

        info!("Bookmarked {} of {} tabs into {:?}", count, tabs.len(), title);
        Ok(BookmarkSummary {
            folder_id,
            count,
            failed,
        })
    }

    pub async fn manage_tab(&self, action: TabAction, tab_id: i32, window_id: Option<i32>) -> Result<()> {
        let require_window = || {
            window_id.ok_or(Error::MissingWindowId {
                action: action.name(),
            })
        };

        match action {
            TabAction::Close => self.platform.close_tab(tab_id).await?,
            TabAction::Focus => self.platform.focus_tab(tab_id, require_window()?).await?,
            TabAction::Pin => {
                let tab = self.platform.get_tab(tab_id).await?;
                self.platform.set_pinned(tab_id, !tab.pinned).await?;
            }
            TabAction::MoveToNewWindow => self.platform.move_to_new_window(tab_id).await?,
            TabAction::MoveToWindow => self.platform.move_to_window(tab_id, require_window()?).await?,
        }

        debug!("Applied {} to tab {}", action.name(), tab_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::storage::tests::YieldingStore;
    use crate::testing::FakeBrowser;
    use futures::executor::block_on;
    use futures::future::join3;

    fn manager(urls: &[&str]) -> TabManager<MemoryStore, FakeBrowser> {
        TabManager::new(MemoryStore::new(), FakeBrowser::with_urls(urls), ManagerConfig::default())
    }

    #[test]
    fn test_push_capped() {
        let mut history = Vec::new();
        for i in 0..5 {
            let snapshot = SessionSnapshot {
                timestamp: i.to_string(),
                tabs: vec![],
            };
            push_capped(&mut history, snapshot, 3);
        }

        let timestamps: Vec<&str> = history.iter().map(|s| s.timestamp.as_str()).collect();
        assert_eq!(timestamps, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_empty_store_reads_as_empty() {
        let manager = manager(&[]);

        assert!(block_on(manager.history()).unwrap().is_empty());
        assert!(block_on(manager.folders()).unwrap().is_empty());
        assert!(block_on(manager.saved_sessions()).unwrap().is_empty());
    }

    #[test]
    fn test_history_evicts_oldest_after_101_snapshots() {
        let manager = manager(&["https://a.com"]);

        let taken: Vec<SessionSnapshot> = (0..101)
            .map(|_| block_on(manager.record_history_snapshot()).unwrap())
            .collect();

        let history = block_on(manager.history()).unwrap();
        assert_eq!(history.len(), 100);
        assert_eq!(history[0].timestamp, taken[1].timestamp);
        assert_eq!(history[99].timestamp, taken[100].timestamp);
        assert!(history.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_history_respects_configured_limit() {
        let config = ManagerConfig {
            history_limit: 2,
            ..ManagerConfig::default()
        };
        let manager = TabManager::new(MemoryStore::new(), FakeBrowser::with_urls(&["https://a.com"]), config);

        for _ in 0..4 {
            block_on(manager.record_history_snapshot()).unwrap();
        }

        assert_eq!(block_on(manager.history()).unwrap().len(), 2);
    }

    #[test]
    fn test_history_failure_leaves_store_untouched() {
        let manager = manager(&["https://a.com"]);
        manager.platform().fail_list_tabs.set(true);

        assert!(block_on(manager.record_history_snapshot()).is_err());
        assert!(block_on(manager.history()).unwrap().is_empty());
    }

    #[test]
    fn test_saved_sessions_are_uncapped() {
        let config = ManagerConfig {
            history_limit: 1,
            ..ManagerConfig::default()
        };
        let manager = TabManager::new(MemoryStore::new(), FakeBrowser::with_urls(&["https://a.com"]), config);

        for _ in 0..3 {
            block_on(manager.save_session()).unwrap();
        }

        assert_eq!(block_on(manager.saved_sessions()).unwrap().len(), 3);
        assert!(block_on(manager.history()).unwrap().is_empty());
    }

    #[test]
    fn test_restore_without_timestamp_uses_last_session() {
        let manager = manager(&["https://a.com"]);
        block_on(manager.save_session()).unwrap();
        manager.platform().open_tab("https://b.com");
        block_on(manager.save_session()).unwrap();

        let restored = block_on(manager.restore_session(None)).unwrap();

        assert!(restored);
        assert_eq!(
            manager.platform().windows_created(),
            vec![vec!["https://a.com".to_string(), "https://b.com".to_string()]]
        );
    }

    #[test]
    fn test_restore_by_timestamp() {
        let manager = manager(&["https://a.com"]);
        let first = block_on(manager.save_session()).unwrap();
        manager.platform().open_tab("https://b.com");
        block_on(manager.save_session()).unwrap();

        assert!(block_on(manager.restore_session(Some(&first.timestamp))).unwrap());

        assert_eq!(manager.platform().windows_created(), vec![vec!["https://a.com".to_string()]]);
    }

    #[test]
    fn test_restore_unknown_timestamp_is_noop() {
        let manager = manager(&["https://a.com"]);
        block_on(manager.save_session()).unwrap();

        let restored = block_on(manager.restore_session(Some("1999-01-01T00:00:00.000Z"))).unwrap();

        assert!(!restored);
        assert!(manager.platform().windows_created().is_empty());
    }

    #[test]
    fn test_restore_with_no_sessions_is_noop() {
        let manager = manager(&[]);

        assert!(!block_on(manager.restore_session(None)).unwrap());
        assert!(manager.platform().windows_created().is_empty());
    }

    #[test]
    fn test_folder_round_trip_opens_urls_in_order() {
        let manager = manager(&[]);
        let tabs = vec![
            TabSnapshot::new("https://a.com", ""),
            TabSnapshot::new("https://b.com", ""),
        ];

        block_on(manager.save_tabs_to_folder("Work", tabs)).unwrap();
        block_on(manager.open_tabs_from_folder("Work")).unwrap();

        assert_eq!(
            manager.platform().windows_created(),
            vec![vec!["https://a.com".to_string(), "https://b.com".to_string()]]
        );
    }

    #[test]
    fn test_folder_save_overwrites() {
        let manager = manager(&[]);
        block_on(manager.save_tabs_to_folder("Work", vec![TabSnapshot::new("https://a.com", "")])).unwrap();
        block_on(manager.save_tabs_to_folder("Work", vec![TabSnapshot::new("https://z.com", "")])).unwrap();

        let folders = block_on(manager.folders()).unwrap();

        assert_eq!(folders.len(), 1);
        assert_eq!(folders["Work"], vec![TabSnapshot::new("https://z.com", "")]);
    }

    #[test]
    fn test_folder_name_must_not_be_blank() {
        let manager = manager(&[]);

        let result = block_on(manager.save_tabs_to_folder("   ", vec![]));

        assert!(matches!(result, Err(Error::InvalidFolderName { .. })));
        assert!(block_on(manager.folders()).unwrap().is_empty());
    }

    #[test]
    fn test_open_missing_folder_is_silent_success() {
        let manager = manager(&[]);

        assert!(block_on(manager.open_tabs_from_folder("Nope")).is_ok());
        assert!(manager.platform().windows_created().is_empty());
    }

    #[test]
    fn test_bookmark_all_tabs() {
        let manager = manager(&["https://a.com", "https://b.com"]);

        let summary = block_on(manager.bookmark_all_tabs()).unwrap();

        assert_eq!(summary.count, 2);
        let folders = manager.platform().bookmark_folders.borrow().clone();
        assert_eq!(folders.len(), 1);
        assert!(folders[0].starts_with("Tabs 2024-10-28T"));
        let bookmarks = manager.platform().bookmarks.borrow().clone();
        assert!(bookmarks.iter().all(|(parent, _, _)| *parent == summary.folder_id));
        let urls: Vec<&str> = bookmarks.iter().map(|(_, _, url)| url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.com", "https://b.com"]);
        assert!(summary.failed.is_empty());
    }

    #[test]
    fn test_bookmark_all_tabs_reports_partial_failure() {
        let manager = manager(&["https://a.com", "chrome://settings", "https://c.com", ""]);
        manager
            .platform()
            .reject_bookmarks
            .borrow_mut()
            .push("chrome://settings".to_string());

        let summary = block_on(manager.bookmark_all_tabs()).unwrap();

        assert_eq!(summary.count, 2);
        assert_eq!(summary.failed, vec!["".to_string(), "chrome://settings".to_string()]);
        let urls: Vec<String> = manager
            .platform()
            .bookmarks
            .borrow()
            .iter()
            .map(|(_, _, url)| url.clone())
            .collect();
        assert_eq!(urls, vec!["https://a.com", "https://c.com"]);
    }

    #[test]
    fn test_manage_tab_pin_toggles() {
        let manager = manager(&["https://a.com"]);

        block_on(manager.manage_tab(TabAction::Pin, 1, None)).unwrap();
        assert!(manager.platform().tab(1).unwrap().pinned);

        block_on(manager.manage_tab(TabAction::Pin, 1, None)).unwrap();
        assert!(!manager.platform().tab(1).unwrap().pinned);
    }

    #[test]
    fn test_manage_tab_close_and_move() {
        let manager = manager(&["https://a.com", "https://b.com", "https://c.com"]);

        block_on(manager.manage_tab(TabAction::Close, 2, None)).unwrap();
        block_on(manager.manage_tab(TabAction::MoveToWindow, 1, Some(7))).unwrap();

        let tabs = manager.platform().tabs.borrow().clone();
        let ids: Vec<i32> = tabs.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(tabs[1].window_id, 7);
    }

    #[test]
    fn test_manage_tab_focus_requires_window() {
        let manager = manager(&["https://a.com"]);

        let result = block_on(manager.manage_tab(TabAction::Focus, 1, None));
        assert!(matches!(result, Err(Error::MissingWindowId { action: "focus" })));

        block_on(manager.manage_tab(TabAction::Focus, 1, Some(1))).unwrap();
        assert_eq!(*manager.platform().focused.borrow(), vec![(1, 1)]);
    }

    #[test]
    fn test_manage_unknown_tab_propagates_error() {
        let manager = manager(&[]);

        assert!(block_on(manager.manage_tab(TabAction::Close, 42, None)).is_err());
    }

    #[test]
    fn test_concurrent_writers_keep_every_entry() {
        let manager = TabManager::new(
            YieldingStore::default(),
            FakeBrowser::with_urls(&["https://a.com"]),
            ManagerConfig::default(),
        );

        let (a, b, c) = block_on(join3(
            manager.record_history_snapshot(),
            manager.record_history_snapshot(),
            manager.save_session(),
        ));
        a.unwrap();
        b.unwrap();
        c.unwrap();

        assert_eq!(block_on(manager.history()).unwrap().len(), 2);
        assert_eq!(block_on(manager.saved_sessions()).unwrap().len(), 1);
    }
}
