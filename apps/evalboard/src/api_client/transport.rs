//! One HTTP exchange: timeout, status classification, JSON body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::errors::ApiError;

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// A single logical request, replayed as-is on every retry attempt.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub operation: &'static str,
    pub method: Method,
    /// Raw path segments below the base URL. Encoded when the URL is built.
    pub segments: Vec<String>,
    pub body: Option<Value>,
    /// Set for writes; stays the same across attempts of one save.
    pub idempotency_key: Option<Uuid>,
}

impl ApiRequest {
    pub fn get<S: Into<String>>(
        operation: &'static str,
        segments: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            operation,
            method: Method::GET,
            segments: segments.into_iter().map(Into::into).collect(),
            body: None,
            idempotency_key: None,
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_idempotency_key(mut self, key: Uuid) -> Self {
        self.idempotency_key = Some(key);
        self
    }

    /// Unencoded path, for logs and assertions.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// Executes one attempt of a request. Implementations classify every
/// failure into an [`ApiError`]; they never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<Value, ApiError>;
}

/// reqwest-backed transport. Shares one connection pool across clones.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Fails on a base URL that is not an absolute `http`/`https` URL, so a
    /// misconfigured endpoint never reaches the retry loop.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::invalid_request(format!("base URL {base_url:?}: {e}")))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::invalid_request(format!(
                "base URL {base_url:?} must be an absolute http(s) URL"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::invalid_request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends the request's segments to the base path, percent-encoding each.
    pub fn url_for(&self, request: &ApiRequest) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base can always carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(&request.segments);
        }
        url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let url = self.url_for(request);
        debug!(operation = request.operation, method = %request.method, %url, "sending request");

        let mut builder = self.client.request(request.method.clone(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(key) = request.idempotency_key {
            builder = builder.header(IDEMPOTENCY_KEY_HEADER, key.to_string());
        }

        let response = builder.send().await.map_err(classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body is not worth a second failure.
            let body = response.text().await.ok();
            return Err(ApiError::from_status(status.as_u16(), body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        debug!(
            operation = request.operation,
            status = status.as_u16(),
            bytes = bytes.len(),
            "request succeeded"
        );

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            operation: request.operation.to_string(),
            source,
        })
    }
}

/// A request reqwest refused to build is a local defect, not a connectivity
/// problem, and is not retried.
fn classify_send_error(e: reqwest::Error) -> ApiError {
    if e.is_builder() {
        ApiError::invalid_request(e.to_string())
    } else {
        ApiError::network(e.to_string())
    }
}
