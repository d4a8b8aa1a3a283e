use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::null_as_default;

/// A named axis of evaluation attached to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: i64,
    #[serde(default)]
    pub job_id: i64,
    pub name: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    /// First-class criteria, when the backend joins them in.
    #[serde(
        default,
        rename = "criteria_list",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub criteria: Vec<Criterion>,
    /// Legacy JSON-encoded array of criterion names.
    #[serde(default, rename = "criteria")]
    pub legacy_criteria: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Ordered criterion names for display. The first-class list wins; the
    /// legacy string is only consulted when the backend did not send one.
    pub fn criterion_names(&self) -> Vec<String> {
        if !self.criteria.is_empty() {
            let mut ordered: Vec<&Criterion> = self.criteria.iter().collect();
            ordered.sort_by_key(|c| c.display_order);
            return ordered.into_iter().map(|c| c.name.clone()).collect();
        }

        parse_legacy_criteria(&self.legacy_criteria).unwrap_or_else(|e| {
            warn!(job_id = self.id, error = %e, "unreadable legacy criteria field");
            Vec::new()
        })
    }
}

fn parse_legacy_criteria(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

/// Body for creating or updating a job.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub requirements: String,
    /// JSON-encoded array of criterion names, as the backend stores it.
    pub criteria: String,
}

impl JobDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            criteria: "[]".to_string(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.requirements = requirements.into();
        self
    }

    pub fn with_criteria<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        let names: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
        self.criteria = serde_json::Value::from(names).to_string();
        self
    }
}
