//! Form state: the three user-editable fields and the submission gate.

use crate::errors::ValidationError;
use crate::models::SubmissionInput;
use crate::orchestrator::RequestState;
use crate::validation::{validate, AcceptedFile, CandidateFile, ValidationOutcome};

#[derive(Debug, Clone, Default)]
pub struct FormState {
    title: String,
    description: String,
    file: Option<AcceptedFile>,
    file_error: Option<ValidationError>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn file(&self) -> Option<&AcceptedFile> {
        self.file.as_ref()
    }

    /// Last rejection from the file picker, cleared by the next selection.
    pub fn file_error(&self) -> Option<&ValidationError> {
        self.file_error.as_ref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replaces the current file selection.
    ///
    /// `None` clears the selection without error. A rejected candidate also
    /// clears it, so a stale valid file never survives a bad replacement.
    pub fn select_file(&mut self, candidate: Option<CandidateFile>) -> Result<(), ValidationError> {
        self.file = None;
        self.file_error = None;

        let Some(candidate) = candidate else {
            return Ok(());
        };

        match validate(candidate) {
            ValidationOutcome::Accepted(file) => {
                self.file = Some(file);
                Ok(())
            }
            ValidationOutcome::Rejected(err) => {
                self.file_error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn can_submit(&self, state: &RequestState) -> bool {
        !self.title.trim().is_empty()
            && self.file.is_some()
            && !matches!(state, RequestState::Submitting)
    }

    /// Freezes the current fields into a request payload, or `None` when the
    /// title is blank or no file is accepted.
    pub(crate) fn snapshot(&self) -> Option<SubmissionInput> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let file = self.file.clone()?;

        Some(SubmissionInput {
            title: title.to_string(),
            description: self.description.clone(),
            file,
        })
    }
}
