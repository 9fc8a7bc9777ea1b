//! Client for the external HTML to PDF rendering service.
//!
//! The service receives `{"html": "..."}` and answers either with the PDF
//! bytes or with an error. Errors are expected as `{"error": ..., "details":
//! ...}`, but a crashed service may return anything (an HTML error page, an
//! empty body), so every failure is mapped to a [`RenderFault`] the user can
//! read. Each call is bounded by [`RemoteOptions::timeout`]; there are no
//! retries.

use std::time::Duration;

use serde::Deserialize;

use crate::detect::is_pdf_bytes;
use crate::error::{Error, RenderFault, Result};
use crate::model::Document;
use crate::render::{to_html, RenderOptions};

/// Default time limit for one rendering call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const SNIPPET_LEN: usize = 200;

/// Options for the rendering service.
#[derive(Debug, Clone)]
pub struct RemoteOptions {
    /// URL that accepts the HTML payload
    pub endpoint: String,

    /// Time limit for the whole call, including reading the body
    pub timeout: Duration,
}

impl RemoteOptions {
    /// Options for the given endpoint with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: serde_json::Value,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

/// PDF rendering client.
pub struct PdfClient {
    client: reqwest::Client,
    options: RemoteOptions,
}

impl PdfClient {
    /// Create a client.
    pub fn new(options: RemoteOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| RenderFault::Unavailable(e.to_string()))?;
        Ok(Self { client, options })
    }

    /// Render a document through its HTML form.
    pub async fn render_document(&self, doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
        let html = to_html(doc, options)?;
        self.render_html(&html).await
    }

    /// Send HTML to the service and return the PDF bytes.
    pub async fn render_html(&self, html: &str) -> Result<Vec<u8>> {
        let secs = self.options.timeout.as_secs();
        log::debug!(
            "Sending {} bytes of HTML to {}",
            html.len(),
            self.options.endpoint
        );

        match tokio::time::timeout(self.options.timeout, self.request(html)).await {
            Ok(result) => result.map_err(Error::RenderFault),
            Err(_) => Err(RenderFault::Timeout { secs }.into()),
        }
    }

    async fn request(&self, html: &str) -> std::result::Result<Vec<u8>, RenderFault> {
        let secs = self.options.timeout.as_secs();
        let response = self
            .client
            .post(&self.options.endpoint)
            .json(&serde_json::json!({ "html": html }))
            .send()
            .await
            .map_err(|e| transport_fault(e, secs))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_fault(e, secs))?;

        if status.is_success() && is_pdf_bytes(&body) {
            log::debug!("Received {} bytes of PDF", body.len());
            return Ok(body.to_vec());
        }

        let fault = classify_failure(status.as_u16(), content_type.as_deref(), &body);
        log::warn!("PDF service failed: {}", fault);
        Err(fault)
    }
}

fn transport_fault(err: reqwest::Error, secs: u64) -> RenderFault {
    if err.is_timeout() {
        RenderFault::Timeout { secs }
    } else {
        RenderFault::Unavailable(err.to_string())
    }
}

/// Map a non-PDF response to a fault.
///
/// A JSON body with an `error` field is a structured service error;
/// anything else is opaque and keeps a short snippet for diagnostics.
pub fn classify_failure(status: u16, content_type: Option<&str>, body: &[u8]) -> RenderFault {
    let looks_json = content_type.is_some_and(|ct| ct.contains("json"))
        || body.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{');

    if looks_json {
        if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
            return RenderFault::Service {
                message: value_text(&parsed.error),
                details: parsed.details.as_ref().map(value_text),
            };
        }
    }

    let text = String::from_utf8_lossy(body);
    let snippet: String = text.trim().chars().take(SNIPPET_LEN).collect();
    RenderFault::Opaque { status, snippet }
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
