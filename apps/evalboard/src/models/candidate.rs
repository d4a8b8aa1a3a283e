use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    pub job_id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub description: String,
    /// Present on job listing endpoints only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body for creating or updating a candidate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CandidateDraft {
    pub job_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub description: String,
}

impl CandidateDraft {
    pub fn new(job_id: i64, name: impl Into<String>) -> Self {
        Self {
            job_id,
            name: name.into(),
            ..Default::default()
        }
    }
}
