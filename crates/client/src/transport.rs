use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

/// Request/response verbs against the heroes endpoint.
///
/// Paths are relative to the transport's origin (e.g. `api/heroes/12`).
/// Bodies travel as JSON values so implementations stay object safe.
#[async_trait]
pub trait Transport: Send + Sync {
  fn name(&self) -> &str;

  async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, TransportError>;
  async fn post(&self, path: &str, body: Value) -> Result<Value, TransportError>;
  async fn put(&self, path: &str, body: Value) -> Result<Value, TransportError>;
  async fn delete(&self, path: &str) -> Result<Value, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
  #[error("Request failed: {0}")]
  Request(#[from] reqwest::Error),
  #[error("Http failure response for {url}: {status}")]
  Status { url: String, status: StatusCode },
  #[error("Invalid response body: {0}")]
  Decode(#[from] serde_json::Error),
  #[error("Network error: {0}")]
  Network(String),
  #[error("Request timed out")]
  Timeout,
}

impl TransportError {
  pub fn status(url: impl Into<String>, status: StatusCode) -> Self {
    TransportError::Status { url: url.into(), status }
  }

  pub fn is_not_found(&self) -> bool {
    match self {
      TransportError::Status { status, .. } => *status == StatusCode::NOT_FOUND,
      TransportError::Request(e) => e.status() == Some(StatusCode::NOT_FOUND),
      _ => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_message_names_url_and_status() {
    let err = TransportError::status("api/heroes/99", StatusCode::NOT_FOUND);
    assert_eq!(err.to_string(), "Http failure response for api/heroes/99: 404 Not Found");
    assert!(err.is_not_found());
  }

  #[test]
  fn test_network_error_is_not_not_found() {
    let err = TransportError::Network("connection refused".to_string());
    assert!(!err.is_not_found());
    assert_eq!(err.to_string(), "Network error: connection refused");
  }
}
