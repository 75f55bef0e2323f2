use thiserror::Error;

/// Reason a candidate file was refused by the file validator.
///
/// Never reaches the network layer: it only blocks submission and is shown
/// next to the file picker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Selected file is not a PDF")]
    NotPdf { filename: String },
}

impl ValidationError {
    /// The fixed human-readable rejection reason, without the filename.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::NotPdf { .. } => "not a PDF",
        }
    }
}

/// Failure to move a request to the analysis service and back.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Terminal failure of one submission. Each variant maps to the message shown
/// in the `Failed` state via [`SubmitError::user_message`].
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Service error (status {status})")]
    Service { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub const TRANSPORT_FAILURE_MESSAGE: &str = "Could not reach the analysis service";

impl SubmitError {
    /// Text surfaced to the recruiter.
    ///
    /// Service errors show the response body verbatim when it has any content,
    /// otherwise a message derived from the status code.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Transport(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
            SubmitError::Service { status, body } => {
                if body.trim().is_empty() {
                    format!("Request failed with status {status}")
                } else {
                    body.clone()
                }
            }
            SubmitError::Decode(e) => {
                format!("Unexpected response from the analysis service: {e}")
            }
        }
    }
}
