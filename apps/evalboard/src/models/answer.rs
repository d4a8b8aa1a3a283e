use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate's free-text response to one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub id: i64,
    pub candidate_id: i64,
    pub question_id: i64,
    #[serde(default)]
    pub answer_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Answer {
    pub fn new(candidate_id: i64, question_id: i64, answer_text: impl Into<String>) -> Self {
        Self {
            id: 0,
            candidate_id,
            question_id,
            answer_text: answer_text.into(),
            created_at: None,
            updated_at: None,
        }
    }
}
