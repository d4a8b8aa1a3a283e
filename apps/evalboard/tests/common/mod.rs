//! In-memory stand-in for the evaluation backend, served by axum on an
//! ephemeral port. Mirrors the backend's quirks: empty lists come back as
//! `null` and errors are plain-text bodies.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use evalboard::{ApiClient, ClientConfig, RetryPolicy};

#[derive(Default)]
pub struct Backend {
    pub jobs: Vec<Value>,
    pub candidates: Vec<Value>,
    pub evaluations: HashMap<i64, Vec<Value>>,
    pub failing_evaluations: HashSet<i64>,
    pub summary_unavailable: bool,
    pub evaluation_lookups: usize,
    pub idempotency_keys: Vec<String>,
}

pub type SharedBackend = Arc<Mutex<Backend>>;

type HandlerResult = Result<Json<Value>, (StatusCode, String)>;

/// One job with two criteria and three candidates. Alice and Bob are
/// scored, Cleo is not.
pub fn seeded() -> Backend {
    let mut backend = Backend {
        jobs: vec![json!({
            "id": 1,
            "title": "Backend Engineer",
            "description": "Build APIs",
            "requirements": "Rust",
            "criteria": "[\"Coding\",\"Communication\"]",
            "criteria_list": [
                {"id": 10, "job_id": 1, "name": "Coding", "display_order": 0},
                {"id": 11, "job_id": 1, "name": "Communication", "display_order": 1}
            ],
            "created_at": "2024-05-01T09:00:00Z",
            "updated_at": "2024-05-01T09:00:00Z"
        })],
        candidates: vec![
            candidate(1, "Alice"),
            candidate(2, "Bob"),
            candidate(3, "Cleo"),
        ],
        ..Default::default()
    };
    backend.evaluations.insert(
        1,
        vec![
            evaluation(1, 10, "Coding", 9, "Strong Rust"),
            evaluation(1, 11, "Communication", 7, ""),
        ],
    );
    backend.evaluations.insert(
        2,
        vec![
            evaluation(2, 10, "Coding", 5, ""),
            evaluation(2, 11, "Communication", 6, "Nervous"),
        ],
    );
    backend
}

fn candidate(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "job_id": 1,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "phone": "",
        "description": "",
        "job_title": "Backend Engineer",
        "created_at": "2024-05-02T09:00:00Z",
        "updated_at": "2024-05-02T09:00:00Z"
    })
}

fn evaluation(candidate_id: i64, criterion_id: i64, name: &str, score: u8, comments: &str) -> Value {
    json!({
        "id": candidate_id * 100 + criterion_id,
        "candidate_id": candidate_id,
        "criterion_id": criterion_id,
        "score": score,
        "comments": comments,
        "criterion_name": name
    })
}

pub async fn spawn(backend: Backend) -> (String, SharedBackend) {
    let state: SharedBackend = Arc::new(Mutex::new(backend));

    let app = Router::new()
        .route("/api/jobs", get(list_jobs))
        .route("/api/jobs/:id", get(get_job))
        .route("/api/jobs/:id/candidates", get(job_candidates))
        .route("/api/jobs/:id/evaluations/summary", get(evaluation_summary))
        .route(
            "/api/candidates/:id/evaluations",
            get(candidate_evaluations).post(save_evaluations),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), state)
}

/// Client with real retry counts but no pauses between attempts.
pub fn fast_client(base_url: &str) -> ApiClient {
    let mut config = ClientConfig::new(base_url);
    config.timeout = Duration::from_secs(5);
    config.read_policy = RetryPolicy {
        max_retries: 3,
        initial_delay: Duration::ZERO,
    };
    config.write_policy = RetryPolicy {
        max_retries: 2,
        initial_delay: Duration::ZERO,
    };
    ApiClient::new(&config).unwrap()
}

fn null_if_empty(items: Vec<Value>) -> Value {
    if items.is_empty() {
        Value::Null
    } else {
        Value::Array(items)
    }
}

async fn list_jobs(State(state): State<SharedBackend>) -> HandlerResult {
    let backend = state.lock().unwrap();
    Ok(Json(null_if_empty(backend.jobs.clone())))
}

async fn get_job(State(state): State<SharedBackend>, Path(id): Path<i64>) -> HandlerResult {
    let backend = state.lock().unwrap();
    backend
        .jobs
        .iter()
        .find(|j| j["id"] == json!(id))
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "job not found\n".to_string()))
}

async fn job_candidates(State(state): State<SharedBackend>, Path(id): Path<i64>) -> HandlerResult {
    let backend = state.lock().unwrap();
    let candidates = backend
        .candidates
        .iter()
        .filter(|c| c["job_id"] == json!(id))
        .cloned()
        .collect();
    Ok(Json(null_if_empty(candidates)))
}

async fn evaluation_summary(
    State(state): State<SharedBackend>,
    Path(id): Path<i64>,
) -> HandlerResult {
    let backend = state.lock().unwrap();
    if backend.summary_unavailable {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to query evaluation summary".to_string(),
        ));
    }

    let summaries = backend
        .candidates
        .iter()
        .filter(|c| c["job_id"] == json!(id))
        .map(|c| {
            let candidate_id = c["id"].as_i64().unwrap_or_default();
            let evaluations = backend
                .evaluations
                .get(&candidate_id)
                .cloned()
                .unwrap_or_default();
            let chart: HashMap<String, Value> = evaluations
                .iter()
                .map(|e| {
                    (
                        e["criterion_name"].as_str().unwrap_or_default().to_string(),
                        e["score"].clone(),
                    )
                })
                .collect();
            json!({
                "candidate_id": candidate_id,
                "candidate_name": c["name"],
                "job_title": "Backend Engineer",
                "evaluations": null_if_empty(evaluations),
                "average_score": 0.0,
                "chart_data": chart
            })
        })
        .collect();

    Ok(Json(null_if_empty(summaries)))
}

async fn candidate_evaluations(
    State(state): State<SharedBackend>,
    Path(id): Path<i64>,
) -> HandlerResult {
    let mut backend = state.lock().unwrap();
    backend.evaluation_lookups += 1;
    if backend.failing_evaluations.contains(&id) {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, String::new()));
    }
    let evaluations = backend.evaluations.get(&id).cloned().unwrap_or_default();
    Ok(Json(null_if_empty(evaluations)))
}

async fn save_evaluations(
    State(state): State<SharedBackend>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Vec<Value>>,
) -> HandlerResult {
    let mut backend = state.lock().unwrap();
    if let Some(key) = headers
        .get("idempotency-key")
        .and_then(|v| v.to_str().ok())
    {
        backend.idempotency_keys.push(key.to_string());
    }
    backend.evaluations.insert(id, body);
    Ok(Json(json!({"status": "success"})))
}
