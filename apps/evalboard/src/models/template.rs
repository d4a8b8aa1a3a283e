use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A predefined job posting that seeds criteria and questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTemplate {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub criteria: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<TemplateQuestionGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateQuestionGroup {
    pub criterion: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<String>,
}

impl JobTemplate {
    pub fn question_count(&self) -> usize {
        self.questions.iter().map(|g| g.questions.len()).sum()
    }
}
