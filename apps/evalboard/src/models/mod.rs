//! Wire types for the evaluation REST API.
//!
//! The backend encodes empty collections as `null`, so collection fields go
//! through [`null_as_default`].

pub mod answer;
pub mod candidate;
pub mod evaluation;
pub mod job;
pub mod question;
pub mod template;

use serde::{Deserialize, Deserializer};

pub use answer::Answer;
pub use candidate::{Candidate, CandidateDraft};
pub use evaluation::{Evaluation, EvaluationSummary, Score};
pub use job::{Criterion, Job, JobDraft};
pub use question::{Question, QuestionDraft};
pub use template::{JobTemplate, TemplateQuestionGroup};

/// Deserializes `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
