use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse suitability category assigned by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitLevel {
    Strong,
    Medium,
    Low,
}

impl FitLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitLevel::Strong => "Strong",
            FitLevel::Medium => "Medium",
            FitLevel::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        }
    }
}

/// The next hiring step the service recommends. Wire values are the exact
/// human-readable phrases the service emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreeningRecommendation {
    #[serde(rename = "Proceed to technical interview")]
    ProceedToTechnicalInterview,
    #[serde(rename = "Recruiter screen only")]
    RecruiterScreenOnly,
    #[serde(rename = "Reject")]
    Reject,
}

impl ScreeningRecommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreeningRecommendation::ProceedToTechnicalInterview => {
                "Proceed to technical interview"
            }
            ScreeningRecommendation::RecruiterScreenOnly => "Recruiter screen only",
            ScreeningRecommendation::Reject => "Reject",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(FitLevel, Confidence, ScreeningRecommendation);

/// A claim from the verdict paired with the résumé excerpt that supports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub claim: String,
    pub snippet: String,
}

/// Structured verdict returned by `POST /analyze`.
///
/// Every field is required: a body missing any of them, or carrying an enum
/// value outside the documented set, fails to decode. Fields the service adds
/// later are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub fit_level: FitLevel,
    pub suitable: bool,
    pub confidence: Confidence,
    pub summary: String,
    pub matched_required_skills: Vec<String>,
    pub missing_required_skills: Vec<String>,
    pub matched_nice_to_have: Vec<String>,
    pub missing_nice_to_have: Vec<String>,
    pub risk_flags: Vec<String>,
    pub evidence: Vec<EvidenceItem>,
    pub screening_recommendation: ScreeningRecommendation,
    pub interview_focus_areas: Vec<String>,
    pub final_verdict: String,
    pub final_why: Vec<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceHealth {
    pub ok: bool,
    #[serde(default)]
    pub model: Option<String>,
}
