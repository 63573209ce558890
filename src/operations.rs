/// Tab list operations used by the popup: search filtering and folder capture

use crate::tab_data::{TabInfo, TabSnapshot};

/// Case-insensitive substring match on title or URL. A blank query keeps everything.
pub fn filter_tabs(tabs: &[TabInfo], query: &str) -> Vec<TabInfo> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return tabs.to_vec();
    }

    tabs.iter()
        .filter(|tab| {
            tab.title.to_lowercase().contains(&query) || tab.url.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Snapshots of the tabs currently shown, in display order
pub fn snapshot_tabs(tabs: &[TabInfo]) -> Vec<TabSnapshot> {
    tabs.iter().map(TabSnapshot::from).collect()
}
