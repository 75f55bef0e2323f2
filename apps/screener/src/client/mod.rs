//! Analysis service client — the only place that talks HTTP to the service.
//!
//! The orchestrator goes through [`AnalysisTransport`]; decoding and failure
//! mapping stay with the orchestrator so every transport behaves the same.
//! No retries and no request timeout: a request runs until the service or the
//! network gives an answer.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::errors::{SubmitError, TransportError};
use crate::models::{ServiceHealth, SubmissionInput};
use crate::validation::PDF_MEDIA_TYPE;

pub const ANALYZE_PATH: &str = "/analyze";
pub const HEALTH_PATH: &str = "/health";

pub const FIELD_TITLE: &str = "position_title";
pub const FIELD_DESCRIPTION: &str = "position_description";
pub const FIELD_CV: &str = "cv_pdf";

/// Status line and body text of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one analysis request. Implement this to swap the network layer
/// without touching the orchestrator.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn send_analysis(&self, input: &SubmissionInput) -> Result<RawResponse, TransportError>;
}

/// `reqwest`-backed transport for `POST {API_BASE}/analyze`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    api_base: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
        })
    }

    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.api_base, ANALYZE_PATH)
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.api_base, HEALTH_PATH)
    }

    /// Probes `GET /health`. Not part of the submission lifecycle.
    pub async fn health(&self) -> Result<ServiceHealth, SubmitError> {
        let response = self
            .client
            .get(self.health_url())
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(TransportError::from)?;
        let raw = RawResponse { status, body };

        if !raw.is_success() {
            return Err(SubmitError::Service {
                status: raw.status,
                body: raw.body,
            });
        }

        Ok(serde_json::from_str(&raw.body)?)
    }
}

/// Builds the three-part multipart body. The CV part is always labelled
/// `application/pdf`, including files accepted by extension alone.
pub fn build_form(input: &SubmissionInput) -> Result<Form, reqwest::Error> {
    let cv = Part::bytes(input.file.bytes().to_vec())
        .file_name(input.file.filename().to_string())
        .mime_str(PDF_MEDIA_TYPE)?;

    Ok(Form::new()
        .text(FIELD_TITLE, input.title.clone())
        .text(FIELD_DESCRIPTION, input.description.clone())
        .part(FIELD_CV, cv))
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    async fn send_analysis(&self, input: &SubmissionInput) -> Result<RawResponse, TransportError> {
        let form = build_form(input)?;

        let response = self
            .client
            .post(self.analyze_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, body_len = body.len(), "Analysis service responded");

        Ok(RawResponse { status, body })
    }
}
