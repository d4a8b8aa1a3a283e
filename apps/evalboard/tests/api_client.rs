//! HTTP-level tests for ApiClient.
//!
//! Uses wiremock for the backend. Covers status classification (2xx, 4xx,
//! 5xx, transport failures, timeouts), retry counts, idempotency keys and
//! path encoding.

use std::time::Duration;

use evalboard::api_client::RetryPolicy;
use evalboard::errors::NETWORK_ERROR_MESSAGE;
use evalboard::models::{Evaluation, JobDraft, Score};
use evalboard::{ApiClient, ApiError, ClientConfig};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn instant_retries(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        initial_delay: Duration::ZERO,
    }
}

fn create_test_client(base_url: &str) -> ApiClient {
    let mut config = ClientConfig::new(format!("{base_url}/api"));
    config.read_policy = instant_retries(3);
    config.write_policy = instant_retries(2);
    ApiClient::new(&config).expect("failed to create client")
}

fn job_body(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Platform Engineer",
        "description": "Own the build",
        "requirements": "Rust, Linux",
        "criteria": "[\"Coding\",\"Ops\"]",
        "created_at": "2024-06-01T12:00:00Z",
        "updated_at": "2024-06-01T12:00:00Z"
    })
}

#[tokio::test]
async fn test_get_job_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body(7)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let job = client.get_job(7).await.expect("fetch failed");

    assert_eq!(job.title, "Platform Engineer");
    assert_eq!(job.criterion_names(), vec!["Coding", "Ops"]);
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("job not found\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let err = client.get_job(404).await.unwrap_err();

    assert!(matches!(err, ApiError::Client { status: 404, .. }));
    assert_eq!(err.message(), "job not found");
    assert!(!err.is_network_error());
}

#[tokio::test]
async fn test_server_error_exhausts_read_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let err = client.list_jobs().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), "HTTP 500");
}

#[tokio::test]
async fn test_recovers_after_transient_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/3"))
        .respond_with(ResponseTemplate::new(503).set_body_string("restarting"))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body(3)))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let job = client.get_job(3).await.expect("should recover");

    assert_eq!(job.id, 3);
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_write_retries_fewer_times() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/jobs"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let err = client
        .create_job(&JobDraft::new("Platform Engineer").with_criteria(&["Coding"]))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_create_job_sends_draft() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/jobs"))
        .and(body_json(json!({
            "title": "Platform Engineer",
            "description": "",
            "requirements": "Rust",
            "criteria": "[\"Coding\"]"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body(11)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let draft = JobDraft::new("Platform Engineer")
        .with_requirements("Rust")
        .with_criteria(&["Coding"]);
    let job = client.create_job(&draft).await.expect("create failed");

    assert_eq!(job.id, 11);
}

#[tokio::test]
async fn test_save_reuses_idempotency_key_on_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/candidates/5/evaluations"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/candidates/5/evaluations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let evaluations = vec![Evaluation::new(5, 10, Score::new(8).unwrap()).with_comments("calm")];
    let key = client
        .save_candidate_evaluations(5, &evaluations)
        .await
        .expect("save failed");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        let sent = request
            .headers
            .get("idempotency-key")
            .and_then(|v| v.to_str().ok())
            .expect("missing idempotency key");
        assert_eq!(sent, key.to_string());
    }
}

#[tokio::test]
async fn test_delete_accepts_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/candidates/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    client.delete_candidate(9).await.expect("delete failed");
}

#[tokio::test]
async fn test_templates_by_category_encodes_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/templates/category/Data%20Science"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "data-engineer",
            "title": "Data Engineer",
            "category": "Data Science",
            "level": "middle",
            "description": "",
            "requirements": "",
            "criteria": ["SQL", "Modeling"],
            "questions": [{"criterion": "SQL", "questions": ["Explain a window function"]}]
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let templates = client
        .templates_by_category("Data Science")
        .await
        .expect("fetch failed");

    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].question_count(), 1);
}

#[tokio::test]
async fn test_non_json_success_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/candidates/2/answers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let err = client.candidate_answers(2).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind and drop to get a port nobody listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = ClientConfig::new(format!("http://{addr}/api"));
    config.read_policy = instant_retries(1);
    let client = ApiClient::new(&config).unwrap();

    let err = client.list_jobs().await.unwrap_err();

    assert!(err.is_network_error());
    assert_eq!(err.status(), None);
    assert_eq!(err.message(), NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(job_body(1))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let mut config = ClientConfig::new(format!("{}/api", mock_server.uri()));
    config.timeout = Duration::from_millis(200);
    config.read_policy = RetryPolicy::no_retry();
    let client = ApiClient::new(&config).unwrap();

    let err = client.get_job(1).await.unwrap_err();

    assert!(err.is_network_error());
}

#[tokio::test]
async fn test_slash_in_category_stays_in_one_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/templates/category/Design%2FUX"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let templates = client
        .templates_by_category("Design/UX")
        .await
        .expect("fetch failed");

    assert!(templates.is_empty());
}

#[test]
fn test_base_url_without_scheme_fails_before_any_request() {
    let config = ClientConfig::new("localhost:8080/api");

    let err = ApiClient::new(&config).err().expect("client should not build");

    assert!(matches!(err, ApiError::InvalidRequest(_)));
    assert!(!err.is_network_error());
    assert!(!err.is_retryable());
}
