//! Moment models — the upstream episodic analysis input.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::{parse_timestamp, TimestampResult};

/// An atomic timestamped observation extracted from episodic source video.
///
/// Moments are produced upstream and never mutated. Records missing optional
/// fields deserialize with defaults rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Moment {
    /// Timestamp within the episode (`H:MM:SS` or bare seconds)
    pub timestamp: String,

    /// Pre-resolved timestamp in seconds, when the producer supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_seconds: Option<f64>,

    /// Character IDs present in the moment
    #[serde(default)]
    pub characters_present: Vec<String>,

    /// Location identifier, if one was recognized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Content classification (e.g. "feeding", "confrontation")
    #[serde(default)]
    pub content_type: String,

    /// Intensity rating 1-5
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<u8>,

    /// Free-text description of the moment
    #[serde(default)]
    pub description: String,
}

impl Moment {
    /// Create a moment with the required fields; optional fields start empty.
    pub fn new(timestamp: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            timestamp_seconds: None,
            characters_present: Vec::new(),
            location: None,
            content_type: content_type.into(),
            intensity: None,
            description: String::new(),
        }
    }

    /// Builder-style seconds override.
    pub fn with_seconds(mut self, seconds: f64) -> Self {
        self.timestamp_seconds = Some(seconds);
        self
    }

    /// Builder-style character list.
    pub fn with_characters(mut self, characters: Vec<String>) -> Self {
        self.characters_present = characters;
        self
    }

    /// Builder-style location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder-style intensity.
    pub fn with_intensity(mut self, intensity: u8) -> Self {
        self.intensity = Some(intensity);
        self
    }

    /// Builder-style description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Resolve the moment's time in seconds.
    ///
    /// Prefers the pre-resolved `timestamp_seconds` field and falls back to
    /// parsing the textual timestamp.
    pub fn resolved_seconds(&self) -> TimestampResult {
        match self.timestamp_seconds {
            Some(seconds) => Ok(seconds),
            None => parse_timestamp(&self.timestamp),
        }
    }
}

/// Ordered moments for a single episode — the per-episode input envelope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EpisodeMoments {
    /// Episode identifier
    pub episode_id: String,

    /// Moments in chronological order
    #[serde(default)]
    pub key_moments: Vec<Moment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_seconds_prefers_explicit() {
        let m = Moment::new("0:01:00", "feeding").with_seconds(45.0);
        assert_eq!(m.resolved_seconds().unwrap(), 45.0);
    }

    #[test]
    fn test_resolved_seconds_parses_timestamp() {
        let m = Moment::new("0:01:30", "feeding");
        assert_eq!(m.resolved_seconds().unwrap(), 90.0);
    }

    #[test]
    fn test_resolved_seconds_malformed() {
        let m = Moment::new("not-a-time", "feeding");
        assert!(m.resolved_seconds().is_err());
    }

    #[test]
    fn test_moment_deserializes_with_missing_fields() {
        let m: Moment = serde_json::from_str(r#"{"timestamp": "0:00:10"}"#).unwrap();
        assert!(m.characters_present.is_empty());
        assert!(m.location.is_none());
        assert!(m.intensity.is_none());
        assert_eq!(m.content_type, "");
    }
}
