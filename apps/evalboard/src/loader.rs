//! Screen data flows: concurrent fetches joined, then handed to the
//! comparison engine.
//!
//! Loaders depend on [`EvaluationSource`], not on the HTTP client, so the
//! same flow runs against the live API or a test double.

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::api_client::ApiClient;
use crate::comparison::{
    candidate_status, chart_series, not_evaluated, rank, summarize, CandidateEvaluationSummary,
    CandidateStatus, ChartSeries, ComparisonStats, Ranking,
};
use crate::errors::ApiError;
use crate::models::{Candidate, Evaluation, EvaluationSummary, Job};

/// The reads the comparison and candidate-list screens need.
#[async_trait]
pub trait EvaluationSource: Send + Sync {
    async fn job(&self, job_id: i64) -> Result<Job, ApiError>;
    async fn job_candidates(&self, job_id: i64) -> Result<Vec<Candidate>, ApiError>;
    async fn job_evaluation_summary(&self, job_id: i64)
        -> Result<Vec<EvaluationSummary>, ApiError>;
    async fn candidate_evaluations(&self, candidate_id: i64)
        -> Result<Vec<Evaluation>, ApiError>;
}

#[async_trait]
impl EvaluationSource for ApiClient {
    async fn job(&self, job_id: i64) -> Result<Job, ApiError> {
        self.get_job(job_id).await
    }

    async fn job_candidates(&self, job_id: i64) -> Result<Vec<Candidate>, ApiError> {
        ApiClient::job_candidates(self, job_id).await
    }

    async fn job_evaluation_summary(
        &self,
        job_id: i64,
    ) -> Result<Vec<EvaluationSummary>, ApiError> {
        ApiClient::job_evaluation_summary(self, job_id).await
    }

    async fn candidate_evaluations(&self, candidate_id: i64) -> Result<Vec<Evaluation>, ApiError> {
        ApiClient::candidate_evaluations(self, candidate_id).await
    }
}

/// Everything the comparison screen renders.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonView {
    pub job: Job,
    pub criteria: Vec<String>,
    /// In candidate order.
    pub summaries: Vec<CandidateEvaluationSummary>,
    pub ranking: Ranking,
    /// Radar-chart dataset, one series per ranked candidate.
    pub chart: Vec<ChartSeries>,
    pub stats: ComparisonStats,
}

/// Loads the comparison for a job.
///
/// Job and candidates are fetched together; either failing fails the load.
/// A failed summary fetch degrades to every candidate `not_evaluated`.
pub async fn load_comparison(
    source: &dyn EvaluationSource,
    job_id: i64,
) -> Result<ComparisonView, ApiError> {
    let (job, candidates) =
        tokio::try_join!(source.job(job_id), source.job_candidates(job_id))?;

    let criteria = job.criterion_names();

    let summaries = match source.job_evaluation_summary(job_id).await {
        Ok(raw) => summarize(&candidates, &raw, &job.criteria),
        Err(e) => {
            warn!(job_id, error = %e, "evaluation summary unavailable, showing candidates as not evaluated");
            not_evaluated(&candidates)
        }
    };

    let ranking = rank(&summaries);
    let chart = chart_series(&ranking.ranked, &criteria);
    let stats = ComparisonStats::new(&summaries, criteria.len());

    info!(
        job_id,
        candidates = stats.total_candidates,
        evaluated = stats.evaluated,
        "comparison loaded"
    );

    Ok(ComparisonView {
        job,
        criteria,
        summaries,
        ranking,
        chart,
        stats,
    })
}

/// Loads the candidate list of a job with each candidate's evaluation status.
///
/// Per-candidate lookups run concurrently. A failed lookup marks only that
/// candidate `not_evaluated`; the list as a whole still loads.
pub async fn load_candidate_statuses(
    source: &dyn EvaluationSource,
    job_id: i64,
) -> Result<(Job, Vec<CandidateStatus>), ApiError> {
    let (job, candidates) =
        tokio::try_join!(source.job(job_id), source.job_candidates(job_id))?;

    let lookups = candidates
        .iter()
        .map(|candidate| source.candidate_evaluations(candidate.id));
    let results = join_all(lookups).await;

    let statuses = candidates
        .into_iter()
        .zip(results)
        .map(|(candidate, result)| match result {
            Ok(evaluations) => candidate_status(candidate, Some(evaluations.as_slice())),
            Err(e) => {
                warn!(candidate_id = candidate.id, error = %e, "evaluation lookup failed");
                candidate_status(candidate, None)
            }
        })
        .collect();

    Ok((job, statuses))
}
