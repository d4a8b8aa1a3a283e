use serde::Serialize;

use super::summary::{rounded_mean, EvaluationStatus};
use crate::models::{Candidate, Evaluation};

/// A candidate-list row: who they are and how far their evaluation got.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateStatus {
    pub candidate: Candidate,
    pub status: EvaluationStatus,
    pub average_score: Option<u8>,
    pub evaluations_count: usize,
}

/// Status for one candidate. `None` means the lookup failed, which reads
/// the same as no evaluations at all.
pub fn candidate_status(candidate: Candidate, evaluations: Option<&[Evaluation]>) -> CandidateStatus {
    match evaluations {
        Some(evaluations) if !evaluations.is_empty() => CandidateStatus {
            candidate,
            status: EvaluationStatus::Evaluated,
            average_score: Some(rounded_mean(evaluations.iter().map(|e| e.score.get()))),
            evaluations_count: evaluations.len(),
        },
        _ => CandidateStatus {
            candidate,
            status: EvaluationStatus::NotEvaluated,
            average_score: None,
            evaluations_count: 0,
        },
    }
}
