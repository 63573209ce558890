/// Pull the visible content out of the focused tab

use crate::platform::BrowserPlatform;
use crate::tab_data::PageContent;
use log::{debug, warn};
use thiserror::Error;

/// Why extraction produced no content
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionFailure {
    #[error("no active tab in the focused window")]
    NoActiveTab,

    /// The tab query itself was rejected
    #[error("could not query the active tab: {0}")]
    TabQueryFailed(String),

    /// Restricted page (chrome://, web store) or scripting permission denied
    #[error("script injection failed: {0}")]
    InjectionFailed(String),

    #[error("page returned no content")]
    EmptyResult,
}

/// Snapshot text, HTML, title and URL of the active tab at the moment of the call.
/// Never panics or propagates a platform error; every failure is tagged.
pub async fn extract_active_tab_content<P: BrowserPlatform>(
    platform: &P,
) -> Result<PageContent, ExtractionFailure> {
    let tab = match platform.active_tab().await {
        Ok(Some(tab)) => tab,
        Ok(None) => return Err(ExtractionFailure::NoActiveTab),
        Err(e) => {
            warn!("Could not query active tab: {}", e);
            return Err(ExtractionFailure::TabQueryFailed(e.to_string()));
        }
    };

    debug!("Extracting content from tab {} ({})", tab.id, tab.url);

    match platform.inject_page_content(tab.id).await {
        Ok(Some(content)) => Ok(content),
        Ok(None) => Err(ExtractionFailure::EmptyResult),
        Err(e) => Err(ExtractionFailure::InjectionFailed(e.to_string())),
    }
}
