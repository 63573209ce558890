/// Tab snapshot service: capture the open tabs as persistable records

use crate::error::Result;
use crate::platform::BrowserPlatform;
use crate::tab_data::{SessionSnapshot, TabSnapshot};

/// Snapshot every open tab. Never cached; order is whatever the browser returns.
pub async fn list_tabs<P: BrowserPlatform>(platform: &P) -> Result<Vec<TabSnapshot>> {
    let tabs = platform.list_tabs().await?;
    Ok(tabs.iter().map(TabSnapshot::from).collect())
}

/// Snapshot every open tab, stamped with the current time
pub async fn capture_session<P: BrowserPlatform>(platform: &P) -> Result<SessionSnapshot> {
    let tabs = list_tabs(platform).await?;
    Ok(SessionSnapshot {
        timestamp: platform.now_iso(),
        tabs,
    })
}
