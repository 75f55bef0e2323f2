//! Client for the résumé analysis service.
//!
//! The workflow is front-end agnostic: a front end edits [`form::FormState`]
//! through an [`orchestrator::Orchestrator`], submits through an
//! [`client::AnalysisTransport`], and shows [`render::render`] output or the
//! failure message.

pub mod client;
pub mod config;
pub mod errors;
pub mod form;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod validation;

pub use client::{AnalysisTransport, HttpTransport};
pub use config::Config;
pub use orchestrator::{Orchestrator, RequestState};
