//! Ripple effect models — predicted downstream consequences of a mutation.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How strongly a ripple effect lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Magnitude {
    Moderate,
    Significant,
}

impl Magnitude {
    pub fn as_str(&self) -> &'static str {
        match self {
            Magnitude::Moderate => "moderate",
            Magnitude::Significant => "significant",
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of a ripple effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RippleType {
    /// Direct impact on an existing beat
    BeatImpact,
    /// A character's arc bends
    CharacterArc,
    /// Relationships around the element shift
    RelationshipWeb,
    /// Theme-level consequences
    ThematicShift,
    /// Overall tonal/atmospheric consequences
    AtmosphereShift,
}

impl RippleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RippleType::BeatImpact => "beat_impact",
            RippleType::CharacterArc => "character_arc",
            RippleType::RelationshipWeb => "relationship_web",
            RippleType::ThematicShift => "thematic_shift",
            RippleType::AtmosphereShift => "atmosphere_shift",
        }
    }
}

impl fmt::Display for RippleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A predicted downstream consequence of a mutation, classified by causal
/// order (1 = direct, 2 = secondary, 3 = thematic/atmospheric).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RippleEffect {
    /// Causal order: 1, 2, or 3
    pub order: u8,

    /// Effect category
    pub effect_type: RippleType,

    /// Identifier of the affected element
    pub target: String,

    /// Kind of the affected element (e.g. "beat", "character")
    pub target_type: String,

    /// Human-readable effect description
    pub effect: String,

    /// Predicted strength
    pub magnitude: Magnitude,
}

/// Ripple preview for one mutation card.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RipplePreview {
    /// Deterministic preview identifier derived from the card
    pub ripple_id: String,

    /// Card that seeded the preview
    pub source_card: String,

    /// Card title, for display
    pub source_title: String,

    /// One-line summary of the proposed change
    pub change_summary: String,

    /// Predicted effects, ascending by order (at most 5)
    pub ripples: Vec<RippleEffect>,
}

/// Ripple previews output envelope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RipplePreviewsFile {
    /// Schema/producer version
    pub version: String,

    pub total_previews: usize,

    pub previews: Vec<RipplePreview>,
}

impl RipplePreviewsFile {
    /// Wrap previews in the output envelope.
    pub fn new(version: impl Into<String>, previews: Vec<RipplePreview>) -> Self {
        Self {
            version: version.into(),
            total_previews: previews.len(),
            previews,
        }
    }
}
