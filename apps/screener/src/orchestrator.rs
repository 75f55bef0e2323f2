//! Request orchestrator — owns the form and the request lifecycle.
//!
//! ```text
//! Idle | Succeeded | Failed --begin_submit (gate open)--> Submitting
//! Submitting --complete(Ok)--> Succeeded(result)
//! Submitting --complete(Err)--> Failed(message)
//! ```
//!
//! The network call is the only suspension point. `begin_submit` and
//! `complete` are synchronous transitions around it, and the pending request
//! owns its frozen payload, so the form stays editable while a request is
//! outstanding. The orchestrator is the only writer of `RequestState`.

use chrono::{DateTime, Utc};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::client::{AnalysisTransport, RawResponse};
use crate::errors::SubmitError;
use crate::form::FormState;
use crate::models::{AnalysisResult, SubmissionInput};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Submitting,
    Succeeded(AnalysisResult),
    Failed(String),
}

impl RequestState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, RequestState::Submitting)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Submitting => "submitting",
            RequestState::Succeeded(_) => "succeeded",
            RequestState::Failed(_) => "failed",
        }
    }
}

/// A request that has left `Idle` but has not been sent yet.
#[derive(Debug)]
pub struct PendingRequest {
    id: Uuid,
    started_at: DateTime<Utc>,
    input: SubmissionInput,
}

impl PendingRequest {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn input(&self) -> &SubmissionInput {
        &self.input
    }

    /// Performs the single network call for this request and decodes the reply.
    pub async fn send<T: AnalysisTransport + ?Sized>(self, transport: &T) -> Outcome {
        let span = info_span!("analysis_request", request_id = %self.id);

        async move {
            let result = match transport.send_analysis(&self.input).await {
                Ok(raw) => decode_response(raw),
                Err(e) => Err(SubmitError::from(e)),
            };

            let elapsed_ms = (Utc::now() - self.started_at).num_milliseconds();
            match &result {
                Ok(r) => info!(
                    elapsed_ms,
                    fit_level = %r.fit_level,
                    suitable = r.suitable,
                    recommendation = %r.screening_recommendation,
                    "Analysis succeeded"
                ),
                Err(e) => {
                    warn!(elapsed_ms, error = %e, "Analysis failed");
                    if let SubmitError::Service { body, .. } = e {
                        debug!(body = %body, "Analysis service error body");
                    }
                }
            }

            Outcome {
                id: self.id,
                result,
            }
        }
        .instrument(span)
        .await
    }
}

/// Settled result of a [`PendingRequest`], fed back through [`Orchestrator::complete`].
#[derive(Debug)]
pub struct Outcome {
    id: Uuid,
    result: Result<AnalysisResult, SubmitError>,
}

impl Outcome {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn result(&self) -> &Result<AnalysisResult, SubmitError> {
        &self.result
    }
}

/// Maps a raw exchange onto the result contract. Non-2xx is a service error;
/// a 2xx body that does not decode as [`AnalysisResult`] is a decode error.
pub fn decode_response(raw: RawResponse) -> Result<AnalysisResult, SubmitError> {
    if !raw.is_success() {
        return Err(SubmitError::Service {
            status: raw.status,
            body: raw.body,
        });
    }

    Ok(serde_json::from_str(&raw.body)?)
}

#[derive(Debug, Default)]
pub struct Orchestrator {
    form: FormState,
    state: RequestState,
    in_flight: Option<Uuid>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Editing is allowed in every state; it never touches a pending request.
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit(&self.state)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            RequestState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Enters `Submitting` and freezes the payload. Returns `None` with no
    /// side effect when the gate is closed.
    pub fn begin_submit(&mut self) -> Option<PendingRequest> {
        if !self.can_submit() {
            debug!(state = self.state.name(), "Submit ignored: form not ready");
            return None;
        }
        let input = self.form.snapshot()?;

        let id = Uuid::new_v4();
        self.state = RequestState::Submitting;
        self.in_flight = Some(id);

        info!(
            request_id = %id,
            title = %input.title,
            filename = input.file.filename(),
            bytes = input.file.len(),
            "Submitting résumé for analysis"
        );

        Some(PendingRequest {
            id,
            started_at: Utc::now(),
            input,
        })
    }

    /// Settles the request. The latest completion always wins.
    pub fn complete(&mut self, outcome: Outcome) {
        if self.in_flight == Some(outcome.id) {
            self.in_flight = None;
        } else {
            debug!(request_id = %outcome.id, "Applying outcome of a superseded request");
        }

        self.state = match outcome.result {
            Ok(result) => RequestState::Succeeded(result),
            Err(e) => RequestState::Failed(e.user_message()),
        };
    }

    /// Gate, send, and settle in one call. A closed gate leaves everything as is.
    pub async fn submit<T: AnalysisTransport + ?Sized>(&mut self, transport: &T) -> &RequestState {
        if let Some(pending) = self.begin_submit() {
            let outcome = pending.send(transport).await;
            self.complete(outcome);
        }
        &self.state
    }
}
