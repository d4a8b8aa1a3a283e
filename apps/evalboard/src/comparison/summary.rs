use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Candidate, Criterion, Evaluation, EvaluationSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    NotEvaluated,
    Evaluated,
}

/// Per-candidate comparison row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvaluationSummary {
    pub candidate_id: i64,
    pub candidate_name: String,
    pub overall_score: u8, // 0-10
    pub criteria_scores: HashMap<String, u8>,
    /// Trimmed comments, blank ones dropped, joined by `"; "`.
    pub notes: String,
    pub status: EvaluationStatus,
}

impl CandidateEvaluationSummary {
    pub fn is_evaluated(&self) -> bool {
        self.status == EvaluationStatus::Evaluated
    }

    pub fn score_for(&self, criterion: &str) -> u8 {
        self.criteria_scores.get(criterion).copied().unwrap_or(0)
    }

    fn empty(candidate: &Candidate) -> Self {
        Self {
            candidate_id: candidate.id,
            candidate_name: candidate.name.clone(),
            overall_score: 0,
            criteria_scores: HashMap::new(),
            notes: String::new(),
            status: EvaluationStatus::NotEvaluated,
        }
    }
}

/// Builds one summary per candidate, in candidate order.
///
/// Raw summaries are matched by candidate id. A candidate without a raw
/// summary, or whose summary holds no evaluations, gets a zero-valued
/// `not_evaluated` row. Comments are normalized into `notes`: each is
/// trimmed and whitespace-only ones are skipped. Ranking is a separate
/// step ([`super::rank`]).
pub fn summarize(
    candidates: &[Candidate],
    raw_summaries: &[EvaluationSummary],
    criteria: &[Criterion],
) -> Vec<CandidateEvaluationSummary> {
    candidates
        .iter()
        .map(|candidate| {
            let raw = raw_summaries
                .iter()
                .find(|s| s.candidate_id == candidate.id);

            match raw {
                Some(raw) if !raw.evaluations.is_empty() => {
                    summarize_evaluations(candidate, &raw.evaluations, criteria)
                }
                _ => CandidateEvaluationSummary::empty(candidate),
            }
        })
        .collect()
}

/// All-zero rows, used when the summary fetch itself failed.
pub fn not_evaluated(candidates: &[Candidate]) -> Vec<CandidateEvaluationSummary> {
    candidates
        .iter()
        .map(CandidateEvaluationSummary::empty)
        .collect()
}

fn summarize_evaluations(
    candidate: &Candidate,
    evaluations: &[Evaluation],
    criteria: &[Criterion],
) -> CandidateEvaluationSummary {
    // A later evaluation of the same criterion replaces an earlier one.
    let mut criteria_scores = HashMap::new();
    for evaluation in evaluations {
        criteria_scores.insert(criterion_label(evaluation, criteria), evaluation.score.get());
    }

    let overall_score = rounded_mean(criteria_scores.values().copied());

    let notes = evaluations
        .iter()
        .map(|e| e.comments.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("; ");

    CandidateEvaluationSummary {
        candidate_id: candidate.id,
        candidate_name: candidate.name.clone(),
        overall_score,
        criteria_scores,
        notes,
        status: EvaluationStatus::Evaluated,
    }
}

/// Criterion ids are authoritative; the joined name covers legacy jobs
/// whose criteria were never materialized.
fn criterion_label(evaluation: &Evaluation, criteria: &[Criterion]) -> String {
    criteria
        .iter()
        .find(|c| c.id == evaluation.criterion_id)
        .map(|c| c.name.clone())
        .or_else(|| evaluation.criterion_name.clone())
        .unwrap_or_else(|| format!("#{}", evaluation.criterion_id))
}

/// Mean rounded half-up. 0 for no scores.
pub fn rounded_mean(scores: impl IntoIterator<Item = u8>) -> u8 {
    let (sum, count) = scores
        .into_iter()
        .fold((0_u64, 0_u64), |(sum, count), s| (sum + u64::from(s), count + 1));

    if count == 0 {
        return 0;
    }
    ((2 * sum + count) / (2 * count)) as u8
}
