/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! HTTP client for the HL7 endpoints.
//!
//! Built on `reqwest`; every call is bounded by the client timeout and
//! decodes the JSON envelope from the reply.

use crate::api::ApiResponse;
use crate::error::ClientError;
use ironhl7_core::message::Message;
use ironhl7_pipe::serialize;
use reqwest::RequestBuilder;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

/// Default time allowed for one request/response exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Client for an HL7 server.
#[derive(Debug, Clone)]
pub struct Client {
    addr: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client for the server at `addr` (`host:port`).
    #[must_use]
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            timeout: DEFAULT_TIMEOUT,
            http: reqwest::Client::new(),
        }
    }

    /// Sets the exchange timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the server address.
    #[must_use]
    pub fn addr(&self) -> &str {
        &self.addr
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Serializes `message` and POSTs it to `path`.
    ///
    /// # Errors
    /// Returns an error if the exchange fails or the reply is not an envelope.
    /// A server-side rejection is returned as an envelope with `success == false`.
    pub async fn send_message(
        &self,
        path: &str,
        message: &Message,
    ) -> Result<ApiResponse, ClientError> {
        let request = self
            .http
            .post(self.url(path))
            .header(CONTENT_TYPE, CONTENT_TYPE_TEXT)
            .body(serialize(message));
        self.fetch(request).await
    }

    /// GETs `path` and decodes the sample message envelope.
    ///
    /// # Errors
    /// Returns an error if the exchange fails or the reply is not an envelope.
    pub async fn sample_message(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.fetch(self.http.get(self.url(path))).await
    }

    async fn fetch(&self, request: RequestBuilder) -> Result<ApiResponse, ClientError> {
        debug!(addr = %self.addr, "sending request");
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| self.request_error(err))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.request_error(err))?;
        debug!(%status, bytes = body.len(), "received response");
        Ok(serde_json::from_slice(&body)?)
    }

    fn request_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else {
            ClientError::Request(err)
        }
    }
}
