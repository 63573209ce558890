/// Job and scholarship listings

use super::{ApiClient, ApiResponse};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "contract")]
    Contract,
    #[serde(rename = "full time")]
    FullTime,
    #[serde(rename = "part time")]
    PartTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Workplace {
    Remote,
    OnSite,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Active,
    Filled,
    Expired,
    Draft,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: String,
    pub company_title: Option<String>,
    pub job_position: Option<String>,
    pub job_location: Option<String>,
    pub job_type: JobType,
    pub workplace: Option<Workplace>,
    pub due_date: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    pub professional_experience: Option<f64>,
    pub contact_email: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub additional_skills: Vec<String>,
    pub company_culture: Option<String>,
    pub status: JobStatus,
    pub salary: Option<String>,
    pub additional_info: Option<Map<String, Value>>,
    pub extra_data: Option<Map<String, Value>>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScholarshipStatus {
    Active,
    Expired,
    Upcoming,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scholarship {
    pub title: String,
    pub organization: String,
    pub amount: String,
    pub deadline: String,
    #[serde(default)]
    pub eligibility: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub field_of_study: Vec<String>,
    #[serde(default)]
    pub degree_level: Vec<String>,
    pub country: String,
    pub link: String,
    pub status: ScholarshipStatus,
    pub additional_info: Option<Map<String, Value>>,
}

/// `/jobs` answers with its own list field instead of `data`
#[derive(Debug, Deserialize)]
struct JobList {
    #[serde(rename = "jobDescriptions", default)]
    job_descriptions: Vec<Job>,
}

#[derive(Debug, Deserialize)]
struct ScholarshipList {
    #[serde(default)]
    scholarships: Vec<Scholarship>,
}

impl ApiClient {
    pub async fn fetch_jobs(&self) -> Result<Vec<Job>> {
        let list: JobList = self.get("/jobs").await?;
        Ok(list.job_descriptions)
    }

    pub async fn fetch_job(&self, job_id: &str) -> Result<Job> {
        let path = format!("/jobs/{}", urlencoding::encode(job_id));
        let response: ApiResponse<Job> = self.get(&path).await?;
        response.data.ok_or_else(|| Error::NotFound {
            what: format!("Job {}", job_id),
        })
    }

    pub async fn fetch_scholarships(&self) -> Result<Vec<Scholarship>> {
        let list: ScholarshipList = self.get("/scholarships").await?;
        Ok(list.scholarships)
    }

    /// Free-form analysis of a job description; the shape is backend-defined
    pub async fn analyze_job(&self, text: &str) -> Result<Value> {
        self.post_json("/features/analyze-job", &json!({ "text": text })).await
    }
}
