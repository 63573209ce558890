/// File upload and retrieval (CV documents)

use super::{ApiClient, ApiResponse};
use crate::error::{Error, Result};
use log::info;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

pub const ANONYMOUS_USER: &str = "anonymous";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadResponse {
    pub file_id: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub file_id: String,
    pub name: String,
    pub url: String,
    pub uploaded_at: String,
}

fn file_path(file_id: &str) -> String {
    format!("/features/file/{}", urlencoding::encode(file_id))
}

fn user_files_path(user_id: &str) -> String {
    format!("/features/files/{}", urlencoding::encode(user_id))
}

impl ApiClient {
    pub async fn upload_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        user_id: Option<&str>,
    ) -> Result<FileUploadResponse> {
        info!("Uploading file: {}", file_name);

        let mut form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        if let Some(user_id) = user_id {
            form = form.text("userId", user_id.to_string());
        }

        let response: ApiResponse<FileUploadResponse> = self.post_form("/file/upload", form).await?;
        response.into_result("File upload failed")
    }

    pub async fn get_file(&self, file_id: &str) -> Result<FileData> {
        let response: ApiResponse<FileData> = self.get(&file_path(file_id)).await?;
        response.data.ok_or_else(|| Error::NotFound {
            what: format!("File {}", file_id),
        })
    }

    /// Files uploaded by `user_id` (anonymous when `None`); empty when the backend has none
    pub async fn user_files(&self, user_id: Option<&str>) -> Result<Vec<FileData>> {
        let user_id = user_id.unwrap_or(ANONYMOUS_USER);
        let response: ApiResponse<Vec<FileData>> = self.get(&user_files_path(user_id)).await?;
        Ok(response.data.unwrap_or_default())
    }

    pub async fn delete_file(&self, file_id: &str) -> Result<()> {
        info!("Deleting file: {}", file_id);
        self.delete(&file_path(file_id)).await
    }
}
