use crate::validation::AcceptedFile;

/// The frozen payload of one request: what the form held at the moment
/// `submit` fired. Later edits to the form do not reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionInput {
    /// Already trimmed and non-empty.
    pub title: String,
    /// Sent as typed, possibly empty.
    pub description: String,
    pub file: AcceptedFile,
}
