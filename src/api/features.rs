/// AI features: summary, detailed overview and text extraction

use super::ApiClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<SummaryFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<SummaryOptions>,
}

impl SummaryRequest {
    pub fn new(text: impl Into<String>) -> Self {
        SummaryRequest {
            text: text.into(),
            options: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub length: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverviewKind {
    General,
    Technical,
    Business,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewRequest {
    pub content: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<OverviewKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    #[serde(default)]
    pub main_points: Vec<String>,
    #[serde(default)]
    pub key_findings: Vec<String>,
    pub recommendations: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub overview: Overview,
}

impl ApiClient {
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse> {
        self.post_json("/summary", request).await
    }

    pub async fn detailed_overview(&self, request: &OverviewRequest) -> Result<OverviewResponse> {
        self.post_json("/detailed-overview", request).await
    }

    pub async fn extract_texts(&self, request: &OverviewRequest) -> Result<OverviewResponse> {
        self.post_json("/features/extract", request).await
    }
}
