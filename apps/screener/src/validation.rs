//! File validator — decides whether a picked file may be sent as the CV.
//!
//! A file is accepted when its declared media type is exactly
//! `application/pdf`, or when its filename ends in `.pdf` (any case).
//! Content is never inspected.

use std::path::Path;

use bytes::Bytes;

use crate::errors::ValidationError;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A file the user picked or dropped, before validation.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub filename: String,
    pub media_type: Option<String>,
    pub bytes: Bytes,
}

impl CandidateFile {
    pub fn new(
        filename: impl Into<String>,
        media_type: Option<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            media_type,
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk. The declared media type is `media_type` when
    /// given, otherwise whatever `mime_guess` infers from the path.
    pub async fn from_path(path: &Path, media_type: Option<String>) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = media_type.or_else(|| {
            mime_guess::from_path(path)
                .first_raw()
                .map(|m| m.to_string())
        });

        Ok(Self {
            filename,
            media_type,
            bytes: Bytes::from(bytes),
        })
    }
}

/// A file that passed validation. Only [`validate`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedFile {
    filename: String,
    media_type: Option<String>,
    bytes: Bytes,
}

impl AcceptedFile {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted(AcceptedFile),
    Rejected(ValidationError),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted(_))
    }
}

pub fn is_pdf(media_type: Option<&str>, filename: &str) -> bool {
    media_type == Some(PDF_MEDIA_TYPE) || filename.to_lowercase().ends_with(".pdf")
}

pub fn validate(candidate: CandidateFile) -> ValidationOutcome {
    if is_pdf(candidate.media_type.as_deref(), &candidate.filename) {
        ValidationOutcome::Accepted(AcceptedFile {
            filename: candidate.filename,
            media_type: candidate.media_type,
            bytes: candidate.bytes,
        })
    } else {
        ValidationOutcome::Rejected(ValidationError::NotPdf {
            filename: candidate.filename,
        })
    }
}
