/// Captured page content: save to and list from the backend library

use super::{ApiClient, ApiResponse};
use crate::error::Result;
use crate::tab_data::PageContent;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const PAGE_CONTENT: &str = "/page-content/";

/// A page previously saved to the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedPage {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ApiClient {
    pub async fn save_page_content(&self, content: &PageContent) -> Result<ApiResponse<Value>> {
        self.post_json(PAGE_CONTENT, content).await
    }

    pub async fn list_links(&self) -> Result<Vec<SavedPage>> {
        let response: ApiResponse<Vec<SavedPage>> = self.get(PAGE_CONTENT).await?;
        response.into_result("Failed to fetch links")
    }
}
