pub mod analysis;
pub mod submission;

pub use analysis::{
    AnalysisResult, Confidence, EvidenceItem, FitLevel, ScreeningRecommendation, ServiceHealth,
};
pub use submission::SubmissionInput;
