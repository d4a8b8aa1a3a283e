use serde::Serialize;

use super::summary::CandidateEvaluationSummary;

/// An evaluated candidate with its 1-based position.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub position: usize,
    pub is_leader: bool,
    pub summary: CandidateEvaluationSummary,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Ranking {
    /// Evaluated candidates, best first.
    pub ranked: Vec<RankedCandidate>,
    /// Candidates still waiting for an interview, in input order.
    pub not_evaluated: Vec<CandidateEvaluationSummary>,
}

impl Ranking {
    pub fn leader(&self) -> Option<&RankedCandidate> {
        self.ranked.first()
    }

    /// Ranked summaries in order, ready for export.
    pub fn ranked_summaries(&self) -> Vec<CandidateEvaluationSummary> {
        self.ranked.iter().map(|r| r.summary.clone()).collect()
    }
}

/// Splits evaluated from not-evaluated candidates and sorts the evaluated
/// ones by overall score, descending. Equal scores keep their input order.
pub fn rank(summaries: &[CandidateEvaluationSummary]) -> Ranking {
    let (mut evaluated, not_evaluated): (Vec<_>, Vec<_>) = summaries
        .iter()
        .cloned()
        .partition(CandidateEvaluationSummary::is_evaluated);

    // sort_by is stable
    evaluated.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));

    let ranked = evaluated
        .into_iter()
        .enumerate()
        .map(|(i, summary)| RankedCandidate {
            position: i + 1,
            is_leader: i == 0,
            summary,
        })
        .collect();

    Ranking {
        ranked,
        not_evaluated,
    }
}

/// Headline numbers for a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonStats {
    pub total_candidates: usize,
    pub evaluated: usize,
    pub criteria: usize,
}

impl ComparisonStats {
    pub fn new(summaries: &[CandidateEvaluationSummary], criteria_count: usize) -> Self {
        Self {
            total_candidates: summaries.len(),
            evaluated: summaries.iter().filter(|s| s.is_evaluated()).count(),
            criteria: criteria_count,
        }
    }
}
