//! Core domain types for OKR drafts and published OKRs.
//!
//! Field names serialize in camelCase so the JSON exchanged over the HTTP
//! boundary reads `keyResults` / `needsBaselines`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OkrError;

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Theme label attached to an OKR.
///
/// The first eight variants are what the classifier can produce.
/// [`Theme::StrategicExcellence`] only ever comes from an edit instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "Customer Success")]
    CustomerSuccess,
    #[serde(rename = "Sales Enablement")]
    SalesEnablement,
    #[serde(rename = "Team Cohesion")]
    TeamCohesion,
    #[serde(rename = "Product Innovation")]
    ProductInnovation,
    #[serde(rename = "Operational Excellence")]
    OperationalExcellence,
    #[serde(rename = "Growth Strategy")]
    GrowthStrategy,
    #[serde(rename = "Digital Transformation")]
    DigitalTransformation,
    #[serde(rename = "Strategic Initiative")]
    StrategicInitiative,
    #[serde(rename = "Strategic Excellence")]
    StrategicExcellence,
}

impl Theme {
    /// Label used when no keyword matches.
    pub const FALLBACK: Theme = Theme::StrategicInitiative;

    /// Human-readable label, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CustomerSuccess => "Customer Success",
            Self::SalesEnablement => "Sales Enablement",
            Self::TeamCohesion => "Team Cohesion",
            Self::ProductInnovation => "Product Innovation",
            Self::OperationalExcellence => "Operational Excellence",
            Self::GrowthStrategy => "Growth Strategy",
            Self::DigitalTransformation => "Digital Transformation",
            Self::StrategicInitiative => "Strategic Initiative",
            Self::StrategicExcellence => "Strategic Excellence",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = OkrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let theme = match s {
            "Customer Success" => Self::CustomerSuccess,
            "Sales Enablement" => Self::SalesEnablement,
            "Team Cohesion" => Self::TeamCohesion,
            "Product Innovation" => Self::ProductInnovation,
            "Operational Excellence" => Self::OperationalExcellence,
            "Growth Strategy" => Self::GrowthStrategy,
            "Digital Transformation" => Self::DigitalTransformation,
            "Strategic Initiative" => Self::StrategicInitiative,
            "Strategic Excellence" => Self::StrategicExcellence,
            other => return Err(OkrError::validation(format!("unknown theme '{other}'"))),
        };
        Ok(theme)
    }
}

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

/// Coarse heuristic quality label for the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Confidence {
    type Err = OkrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            other => Err(OkrError::validation(format!("unknown confidence '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// OkrDraft
// ---------------------------------------------------------------------------

/// A key result whose current value is still a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineGap {
    /// Position into the draft's `key_results`.
    pub index: usize,
    /// Clarification question shown to the user.
    pub question: String,
}

/// Output of one pipeline run, refined by baseline answers and edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OkrDraft {
    pub theme: Theme,
    pub objective: String,
    /// Display order is meaningful.
    pub key_results: Vec<String>,
    pub confidence: Confidence,
    /// Pending gaps in key-result order.
    #[serde(default)]
    pub needs_baselines: Vec<BaselineGap>,
}

impl OkrDraft {
    /// The gap surfaced to the user next. Only one is answered at a time.
    pub fn next_gap(&self) -> Option<&BaselineGap> {
        self.needs_baselines.first()
    }

    /// Whether any key result still awaits a baseline value.
    pub fn has_pending_baselines(&self) -> bool {
        !self.needs_baselines.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PublishedOkr
// ---------------------------------------------------------------------------

/// Identifier of a published OKR (milliseconds since the epoch, bumped to
/// stay strictly increasing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OkrId(pub i64);

impl fmt::Display for OkrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The approved part of a draft, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct OkrContent {
    pub theme: Theme,
    pub objective: String,
    pub key_results: Vec<String>,
    pub confidence: Confidence,
}

impl From<OkrDraft> for OkrContent {
    fn from(draft: OkrDraft) -> Self {
        Self {
            theme: draft.theme,
            objective: draft.objective,
            key_results: draft.key_results,
            confidence: draft.confidence,
        }
    }
}

/// An approved, immutable OKR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedOkr {
    pub id: OkrId,
    pub theme: Theme,
    pub objective: String,
    pub key_results: Vec<String>,
    pub confidence: Confidence,
    /// When the draft was approved.
    pub timestamp: DateTime<Utc>,
}

impl PublishedOkr {
    pub fn new(id: OkrId, content: OkrContent, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            theme: content.theme,
            objective: content.objective,
            key_results: content.key_results,
            confidence: content.confidence,
            timestamp,
        }
    }
}
