//! Abstract HTTP transport used by the Plex client.
//!
//! The client never talks to the network directly; it issues requests
//! through [`Transport`] and decodes the returned bytes itself. Tests swap
//! in a mock, production uses [`HttpTransport`] over reqwest.

use async_trait::async_trait;
use reqwest::Client;

use thiserror::Error;

/// Request timeout applied to every call.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors surfaced by a transport implementation.
///
/// These never cross the `PlexClient` boundary; the client logs them and
/// maps the operation to its own error taxonomy.
#[derive(Debug, Error)]
pub enum TransportError {
  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("unexpected HTTP status {0}")]
  Status(u16),
}

/// Header name/value pairs attached to a request.
pub type Headers = Vec<(String, String)>;

/// Asynchronous HTTP collaborator.
///
/// Each call resolves exactly once, success or failure; timeouts surface as
/// [`TransportError::Http`]. Retries, TLS and redirects are the
/// implementation's concern.
#[async_trait]
pub trait Transport: Send + Sync {
  /// Issue a GET request and return the raw response body.
  async fn get(&self, url: &str, headers: &Headers) -> Result<Vec<u8>, TransportError>;

  /// Issue a form-encoded POST request and return the raw response body.
  async fn post_form(
    &self,
    url: &str,
    headers: &Headers,
    form: &[(String, String)],
  ) -> Result<Vec<u8>, TransportError>;
}

/// Production transport backed by a shared reqwest client.
pub struct HttpTransport {
  http: Client,
}

impl HttpTransport {
  /// Create a transport with the default timeout.
  pub fn new() -> Self {
    Self {
      http: Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client"),
    }
  }

  fn apply_headers(mut request: reqwest::RequestBuilder, headers: &Headers) -> reqwest::RequestBuilder {
    for (name, value) in headers {
      request = request.header(name, value);
    }
    request
  }

  async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, TransportError> {
    let status = response.status();
    if !status.is_success() {
      return Err(TransportError::Status(status.as_u16()));
    }
    Ok(response.bytes().await?.to_vec())
  }
}

impl Default for HttpTransport {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl Transport for HttpTransport {
  async fn get(&self, url: &str, headers: &Headers) -> Result<Vec<u8>, TransportError> {
    let request = Self::apply_headers(self.http.get(url), headers);
    Self::read_body(request.send().await?).await
  }

  async fn post_form(
    &self,
    url: &str,
    headers: &Headers,
    form: &[(String, String)],
  ) -> Result<Vec<u8>, TransportError> {
    let request = Self::apply_headers(self.http.post(url), headers).form(form);
    Self::read_body(request.send().await?).await
  }
}
