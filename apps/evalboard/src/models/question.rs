use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An interview prompt attached to one criterion of a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub job_id: i64,
    #[serde(default)]
    pub criterion_id: i64,
    pub text: String,
    /// Joined in by the backend on list endpoints.
    #[serde(default, alias = "criterion", skip_serializing_if = "Option::is_none")]
    pub criterion_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body for creating or updating a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub job_id: i64,
    pub criterion_id: i64,
    pub text: String,
}
