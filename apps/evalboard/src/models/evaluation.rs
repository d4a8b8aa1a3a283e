use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::errors::ScoreError;

/// An integer score on the 1-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, ScoreError> {
        Self::try_from(i64::from(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = ScoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Score(value as u8))
        } else {
            Err(ScoreError(value))
        }
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A score and comment for one candidate on one criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default)]
    pub id: i64,
    pub candidate_id: i64,
    #[serde(default)]
    pub criterion_id: i64,
    pub score: Score,
    #[serde(default)]
    pub comments: String,
    /// Joined in by the backend; accepts the legacy `criterion` field too.
    #[serde(default, alias = "criterion", skip_serializing_if = "Option::is_none")]
    pub criterion_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Evaluation {
    pub fn new(candidate_id: i64, criterion_id: i64, score: Score) -> Self {
        Self {
            id: 0,
            candidate_id,
            criterion_id,
            score,
            comments: String::new(),
            criterion_name: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn with_criterion_name(mut self, name: impl Into<String>) -> Self {
        self.criterion_name = Some(name.into());
        self
    }
}

/// Per-candidate evaluation rollup served by `/jobs/:id/evaluations/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub candidate_id: i64,
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub evaluations: Vec<Evaluation>,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chart_data: HashMap<String, i64>,
}
