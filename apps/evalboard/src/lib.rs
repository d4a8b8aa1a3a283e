//! Client for a candidate-evaluation REST API: a resilient HTTP client with
//! retry and backoff, and a comparison engine that ranks candidates by
//! their per-criterion scores.

pub mod api_client;
pub mod cli;
pub mod comparison;
pub mod config;
pub mod errors;
pub mod loader;
pub mod models;

pub use api_client::{ApiClient, ClientConfig, RetryPolicy};
pub use errors::ApiError;
