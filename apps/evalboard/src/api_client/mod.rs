//! API client: the single point of entry for all calls to the evaluation backend.
//!
//! Every operation goes through [`ApiClient::call`], which wraps a timed
//! HTTP exchange in [`retry_with_backoff`]. Reads and writes carry separate
//! retry policies; each logical save carries one idempotency key across all
//! of its attempts.
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::{
    Answer, Candidate, CandidateDraft, Criterion, Evaluation, EvaluationSummary, Job, JobDraft,
    JobTemplate, Question, QuestionDraft,
};

pub mod retry;
pub mod transport;

pub use retry::{retry_with_backoff, RetryPolicy, Sleeper, TokioSleeper};
pub use transport::{ApiRequest, HttpTransport, Transport};

/// Connection and retry settings for [`ApiClient::new`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub read_policy: RetryPolicy,
    pub write_policy: RetryPolicy,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
            read_policy: RetryPolicy::read(),
            write_policy: RetryPolicy::write(),
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    read_policy: RetryPolicy,
    write_policy: RetryPolicy,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(&config.base_url, config.timeout)?;
        Ok(Self::with_transport(Arc::new(transport))
            .with_policies(config.read_policy, config.write_policy))
    }

    /// Builds a client over any transport, with default policies.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            sleeper: Arc::new(TokioSleeper),
            read_policy: RetryPolicy::read(),
            write_policy: RetryPolicy::write(),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_policies(mut self, read: RetryPolicy, write: RetryPolicy) -> Self {
        self.read_policy = read;
        self.write_policy = write;
        self
    }

    /// Runs a request under `policy` and deserializes the final body.
    /// Decoding happens once, after the retry loop.
    pub async fn call<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        policy: RetryPolicy,
    ) -> Result<T, ApiError> {
        let value = self.call_raw(&request, policy).await?;
        decode(request.operation, value)
    }

    async fn call_raw(&self, request: &ApiRequest, policy: RetryPolicy) -> Result<Value, ApiError> {
        retry_with_backoff(request.operation, policy, self.sleeper.as_ref(), || {
            self.transport.execute(request)
        })
        .await
    }

    async fn read<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: Vec<String>,
    ) -> Result<T, ApiError> {
        self.call(ApiRequest::get(operation, path), self.read_policy)
            .await
    }

    /// List endpoints answer `null` when empty.
    async fn read_list<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: Vec<String>,
    ) -> Result<Vec<T>, ApiError> {
        let items: Option<Vec<T>> = self.read(operation, path).await?;
        Ok(items.unwrap_or_default())
    }

    async fn write<B: Serialize, T: DeserializeOwned>(
        &self,
        operation: &'static str,
        method: Method,
        path: Vec<String>,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = ApiRequest::get(operation, path)
            .with_method(method)
            .with_body(encode(operation, body)?);
        self.call(request, self.write_policy).await
    }

    /// A write whose response body carries nothing the caller needs.
    async fn write_discarding(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.call_raw(&request, self.write_policy).await?;
        Ok(())
    }

    // ── Jobs ────────────────────────────────────────────────────────────────

    pub async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.read_list("list_jobs", route(["jobs"])).await
    }

    pub async fn get_job(&self, id: i64) -> Result<Job, ApiError> {
        self.read("get_job", route(["jobs", &id.to_string()])).await
    }

    pub async fn create_job(&self, job: &JobDraft) -> Result<Job, ApiError> {
        self.write("create_job", Method::POST, route(["jobs"]), job)
            .await
    }

    pub async fn update_job(&self, id: i64, job: &JobDraft) -> Result<Job, ApiError> {
        self.write("update_job", Method::PUT, route(["jobs", &id.to_string()]), job)
            .await
    }

    pub async fn delete_job(&self, id: i64) -> Result<(), ApiError> {
        let request = ApiRequest::get("delete_job", route(["jobs", &id.to_string()]))
            .with_method(Method::DELETE);
        self.write_discarding(request).await
    }

    /// Replaces the job's criteria with `names`, in order.
    pub async fn replace_job_criteria<S: AsRef<str>>(
        &self,
        job_id: i64,
        names: &[S],
    ) -> Result<Vec<Criterion>, ApiError> {
        let names: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
        let criteria: Option<Vec<Criterion>> = self
            .write(
                "replace_job_criteria",
                Method::PUT,
                route(["jobs", &job_id.to_string(), "criteria"]),
                &names,
            )
            .await?;
        Ok(criteria.unwrap_or_default())
    }

    // ── Questions ───────────────────────────────────────────────────────────

    pub async fn list_questions(&self) -> Result<Vec<Question>, ApiError> {
        self.read_list("list_questions", route(["questions"]))
            .await
    }

    pub async fn job_questions(&self, job_id: i64) -> Result<Vec<Question>, ApiError> {
        self.read_list(
            "job_questions",
            route(["jobs", &job_id.to_string(), "questions"]),
        )
        .await
    }

    pub async fn get_question(&self, id: i64) -> Result<Question, ApiError> {
        self.read("get_question", route(["questions", &id.to_string()])).await
    }

    pub async fn create_question(&self, question: &QuestionDraft) -> Result<Question, ApiError> {
        self.write(
            "create_question",
            Method::POST,
            route(["questions"]),
            question,
        )
        .await
    }

    pub async fn update_question(
        &self,
        id: i64,
        question: &QuestionDraft,
    ) -> Result<Question, ApiError> {
        self.write(
            "update_question",
            Method::PUT,
            route(["questions", &id.to_string()]),
            question,
        )
        .await
    }

    pub async fn delete_question(&self, id: i64) -> Result<(), ApiError> {
        let request = ApiRequest::get("delete_question", route(["questions", &id.to_string()]))
            .with_method(Method::DELETE);
        self.write_discarding(request).await
    }

    // ── Candidates ──────────────────────────────────────────────────────────

    pub async fn job_candidates(&self, job_id: i64) -> Result<Vec<Candidate>, ApiError> {
        self.read_list(
            "job_candidates",
            route(["jobs", &job_id.to_string(), "candidates"]),
        )
        .await
    }

    pub async fn get_candidate(&self, id: i64) -> Result<Candidate, ApiError> {
        self.read("get_candidate", route(["candidates", &id.to_string()])).await
    }

    pub async fn create_candidate(&self, candidate: &CandidateDraft) -> Result<Candidate, ApiError> {
        self.write(
            "create_candidate",
            Method::POST,
            route(["candidates"]),
            candidate,
        )
        .await
    }

    pub async fn update_candidate(
        &self,
        id: i64,
        candidate: &CandidateDraft,
    ) -> Result<Candidate, ApiError> {
        self.write(
            "update_candidate",
            Method::PUT,
            route(["candidates", &id.to_string()]),
            candidate,
        )
        .await
    }

    pub async fn delete_candidate(&self, id: i64) -> Result<(), ApiError> {
        let request = ApiRequest::get("delete_candidate", route(["candidates", &id.to_string()]))
            .with_method(Method::DELETE);
        self.write_discarding(request).await
    }

    // ── Evaluations ─────────────────────────────────────────────────────────

    pub async fn candidate_evaluations(&self, candidate_id: i64) -> Result<Vec<Evaluation>, ApiError> {
        self.read_list(
            "candidate_evaluations",
            route(["candidates", &candidate_id.to_string(), "evaluations"]),
        )
        .await
    }

    /// Replaces the candidate's evaluations. Returns the idempotency key
    /// sent with every attempt of this save.
    pub async fn save_candidate_evaluations(
        &self,
        candidate_id: i64,
        evaluations: &[Evaluation],
    ) -> Result<Uuid, ApiError> {
        self.save_batch(
            "save_candidate_evaluations",
            route(["candidates", &candidate_id.to_string(), "evaluations"]),
            evaluations,
        )
        .await
    }

    pub async fn job_evaluation_summary(
        &self,
        job_id: i64,
    ) -> Result<Vec<EvaluationSummary>, ApiError> {
        self.read_list(
            "job_evaluation_summary",
            route(["jobs", &job_id.to_string(), "evaluations", "summary"]),
        )
        .await
    }

    // ── Answers ─────────────────────────────────────────────────────────────

    pub async fn candidate_answers(&self, candidate_id: i64) -> Result<Vec<Answer>, ApiError> {
        self.read_list(
            "candidate_answers",
            route(["candidates", &candidate_id.to_string(), "answers"]),
        )
        .await
    }

    pub async fn save_candidate_answers(
        &self,
        candidate_id: i64,
        answers: &[Answer],
    ) -> Result<Uuid, ApiError> {
        self.save_batch(
            "save_candidate_answers",
            route(["candidates", &candidate_id.to_string(), "answers"]),
            answers,
        )
        .await
    }

    async fn save_batch<B: Serialize>(
        &self,
        operation: &'static str,
        path: Vec<String>,
        items: &[B],
    ) -> Result<Uuid, ApiError> {
        let key = Uuid::new_v4();
        let request = ApiRequest::get(operation, path)
            .with_method(Method::POST)
            .with_body(encode(operation, &items)?)
            .with_idempotency_key(key);
        self.write_discarding(request).await?;
        Ok(key)
    }

    // ── Templates ───────────────────────────────────────────────────────────

    pub async fn templates(&self) -> Result<Vec<JobTemplate>, ApiError> {
        self.read_list("templates", route(["templates"])).await
    }

    pub async fn template(&self, id: &str) -> Result<JobTemplate, ApiError> {
        self.read("template", route(["templates", id]))
            .await
    }

    pub async fn template_categories(&self) -> Result<Vec<String>, ApiError> {
        self.read_list("template_categories", route(["templates", "categories"]))
            .await
    }

    pub async fn templates_by_category(&self, category: &str) -> Result<Vec<JobTemplate>, ApiError> {
        self.read_list(
            "templates_by_category",
            route(["templates", "category", category]),
        )
        .await
    }
}

/// Raw path segments for a route; the transport encodes them.
fn route<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

fn encode<B: Serialize + ?Sized>(operation: &str, body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|source| ApiError::Encode {
        operation: operation.to_string(),
        source,
    })
}

fn decode<T: DeserializeOwned>(operation: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        operation: operation.to_string(),
        source,
    })
}
