use crate::{Transport, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Transport that talks to a real heroes server over HTTP
#[derive(Debug, Clone)]
pub struct HttpTransport {
  client: reqwest::Client,
  base_url: String,
  /// Applied per request when set
  timeout: Option<Duration>,
}

impl Default for HttpTransport {
  fn default() -> Self {
    Self::new()
  }
}

impl HttpTransport {
  pub fn new() -> Self {
    Self {
      client: reqwest::Client::new(),
      base_url: DEFAULT_BASE_URL.to_string(),
      timeout: None,
    }
  }

  pub fn with_url(mut self, url: impl Into<String>) -> Self {
    self.base_url = url.into();
    self
  }

  pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Join a relative endpoint path onto the origin
  fn url(&self, path: &str) -> String {
    format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
  }

  async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> Result<Value, TransportError> {
    let request = match self.timeout {
      Some(timeout) => request.timeout(timeout),
      None => request,
    };

    let response = request.send().await.map_err(|e| {
      if e.is_timeout() {
        TransportError::Timeout
      } else if e.is_connect() {
        TransportError::Network(e.to_string())
      } else {
        TransportError::Request(e)
      }
    })?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      warn!("{} returned {}: {}", url, status, body);
      return Err(TransportError::status(url, status));
    }

    let body = response.text().await?;
    parse_body(&body)
  }
}

/// Decode a response body, treating an empty body as JSON null
fn parse_body(body: &str) -> Result<Value, TransportError> {
  if body.trim().is_empty() {
    return Ok(Value::Null);
  }
  Ok(serde_json::from_str(body)?)
}

#[async_trait]
impl Transport for HttpTransport {
  fn name(&self) -> &str {
    "http"
  }

  async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, TransportError> {
    let url = self.url(path);
    debug!("GET {} {:?}", url, query);
    let request = self.client.get(&url).query(query);
    self.send(request, &url).await
  }

  async fn post(&self, path: &str, body: Value) -> Result<Value, TransportError> {
    let url = self.url(path);
    debug!("POST {}", url);
    let request = self.client.post(&url).json(&body);
    self.send(request, &url).await
  }

  async fn put(&self, path: &str, body: Value) -> Result<Value, TransportError> {
    let url = self.url(path);
    debug!("PUT {}", url);
    let request = self.client.put(&url).json(&body);
    self.send(request, &url).await
  }

  async fn delete(&self, path: &str) -> Result<Value, TransportError> {
    let url = self.url(path);
    debug!("DELETE {}", url);
    let request = self.client.delete(&url);
    self.send(request, &url).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_url() {
    let transport = HttpTransport::new();
    assert_eq!(transport.url("api/heroes"), "http://localhost:3000/api/heroes");
  }

  #[test]
  fn test_url_joins_without_double_slash() {
    let transport = HttpTransport::new().with_url("http://heroes.test/");
    assert_eq!(transport.url("/api/heroes/12"), "http://heroes.test/api/heroes/12");
    assert_eq!(transport.url("api/heroes"), "http://heroes.test/api/heroes");
  }

  #[test]
  fn test_parse_empty_body_is_null() {
    assert_eq!(parse_body("").unwrap(), Value::Null);
    assert_eq!(parse_body("  \n").unwrap(), Value::Null);
  }

  #[test]
  fn test_parse_body_json() {
    let value = parse_body(r#"[{"id":12,"name":"Dr. Nice"}]"#).unwrap();
    assert_eq!(value[0]["name"], "Dr. Nice");
  }

  #[test]
  fn test_parse_body_rejects_garbage() {
    assert!(matches!(parse_body("<html>"), Err(TransportError::Decode(_))));
  }

  #[test]
  fn test_json_body_sets_single_content_type() {
    let transport = HttpTransport::new();
    let request = transport
      .client
      .put(transport.url("api/heroes"))
      .json(&serde_json::json!({ "id": 12, "name": "Dr. Nice" }))
      .build()
      .unwrap();

    let values: Vec<&str> = request
      .headers()
      .get_all(reqwest::header::CONTENT_TYPE)
      .iter()
      .map(|v| v.to_str().unwrap())
      .collect();
    assert_eq!(values, vec!["application/json"]);
  }

  #[tokio::test]
  async fn test_unreachable_server_is_network_error() {
    // Port 9 (discard) is not expected to be listening locally
    let transport = HttpTransport::new()
      .with_url("http://127.0.0.1:9")
      .with_timeout(Some(Duration::from_secs(2)));

    let result = transport.get("api/heroes", &[]).await;
    assert!(result.is_err());
  }
}
