//! Result renderer — pure mapping from an [`AnalysisResult`] to display groups.
//!
//! Sequences are shown in the order received; nothing is sorted or filtered.
//! Optional groups (nice-to-have matches and misses, risk flags) are dropped
//! when empty. Required groups are always present, empty or not.

use std::fmt;

use serde::Serialize;

use crate::models::{AnalysisResult, Confidence, EvidenceItem, FitLevel, ScreeningRecommendation};

/// Presentational emphasis derived from the fit level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Caution,
    Negative,
}

impl Tone {
    fn marker(&self) -> &'static str {
        match self {
            Tone::Positive => "[+]",
            Tone::Caution => "[~]",
            Tone::Negative => "[-]",
        }
    }
}

pub fn tone_for(fit_level: FitLevel) -> Tone {
    match fit_level {
        FitLevel::Strong => Tone::Positive,
        FitLevel::Medium => Tone::Caution,
        FitLevel::Low => Tone::Negative,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    FinalVerdict,
    MatchedRequiredSkills,
    MissingRequiredSkills,
    MatchedNiceToHave,
    MissingNiceToHave,
    RiskFlags,
    Evidence,
    InterviewFocusAreas,
}

impl SectionKind {
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Summary => "Summary",
            SectionKind::FinalVerdict => "Final verdict",
            SectionKind::MatchedRequiredSkills => "Matched required skills",
            SectionKind::MissingRequiredSkills => "Missing required skills",
            SectionKind::MatchedNiceToHave => "Matched nice-to-have",
            SectionKind::MissingNiceToHave => "Missing nice-to-have",
            SectionKind::RiskFlags => "Risk flags",
            SectionKind::Evidence => "Evidence",
            SectionKind::InterviewFocusAreas => "Interview focus areas",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum SectionBody {
    Text(String),
    /// Verdict sentence with its justification list; `why` is `None` when the
    /// service gave no reasons.
    Verdict {
        verdict: String,
        why: Option<Vec<String>>,
    },
    Items(Vec<String>),
    Evidence(Vec<EvidenceItem>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: &'static str,
    pub body: SectionBody,
}

/// Header badges shown above the sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub fit_level: FitLevel,
    pub suitable: bool,
    pub confidence: Confidence,
    pub screening_recommendation: ScreeningRecommendation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub tone: Tone,
    pub overview: Overview,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

fn section(kind: SectionKind, body: SectionBody) -> Section {
    Section {
        kind,
        title: kind.title(),
        body,
    }
}

fn optional_items(sections: &mut Vec<Section>, kind: SectionKind, items: &[String]) {
    if !items.is_empty() {
        sections.push(section(kind, SectionBody::Items(items.to_vec())));
    }
}

pub fn render(result: &AnalysisResult) -> Report {
    let why = (!result.final_why.is_empty()).then(|| result.final_why.clone());

    let mut sections = vec![
        section(SectionKind::Summary, SectionBody::Text(result.summary.clone())),
        section(
            SectionKind::FinalVerdict,
            SectionBody::Verdict {
                verdict: result.final_verdict.clone(),
                why,
            },
        ),
        section(
            SectionKind::MatchedRequiredSkills,
            SectionBody::Items(result.matched_required_skills.clone()),
        ),
        section(
            SectionKind::MissingRequiredSkills,
            SectionBody::Items(result.missing_required_skills.clone()),
        ),
    ];

    optional_items(&mut sections, SectionKind::MatchedNiceToHave, &result.matched_nice_to_have);
    optional_items(&mut sections, SectionKind::MissingNiceToHave, &result.missing_nice_to_have);
    optional_items(&mut sections, SectionKind::RiskFlags, &result.risk_flags);

    sections.push(section(
        SectionKind::Evidence,
        SectionBody::Evidence(result.evidence.clone()),
    ));
    sections.push(section(
        SectionKind::InterviewFocusAreas,
        SectionBody::Items(result.interview_focus_areas.clone()),
    ));

    Report {
        tone: tone_for(result.fit_level),
        overview: Overview {
            fit_level: result.fit_level,
            suitable: result.suitable,
            confidence: result.confidence,
            screening_recommendation: result.screening_recommendation,
        },
        sections,
    }
}

const EMPTY: &str = "  (none)";

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.overview;
        writeln!(
            f,
            "{} {} fit | Suitable: {} | Confidence: {}",
            self.tone.marker(),
            o.fit_level,
            if o.suitable { "yes" } else { "no" },
            o.confidence
        )?;
        writeln!(f, "Recommendation: {}", o.screening_recommendation)?;

        for s in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", s.title)?;
            match &s.body {
                SectionBody::Text(text) => writeln!(f, "  {text}")?,
                SectionBody::Verdict { verdict, why } => {
                    writeln!(f, "  {verdict}")?;
                    for (i, reason) in why.iter().flatten().enumerate() {
                        writeln!(f, "    {}. {reason}", i + 1)?;
                    }
                }
                SectionBody::Items(items) if items.is_empty() => writeln!(f, "{EMPTY}")?,
                SectionBody::Items(items) => {
                    for item in items {
                        writeln!(f, "  - {item}")?;
                    }
                }
                SectionBody::Evidence(items) if items.is_empty() => writeln!(f, "{EMPTY}")?,
                SectionBody::Evidence(items) => {
                    for item in items {
                        writeln!(f, "  - {}", item.claim)?;
                        writeln!(f, "    \"{}\"", item.snippet)?;
                    }
                }
            }
        }
        Ok(())
    }
}
