//! Beat models — time-windowed aggregations of moments.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A contiguous, time-windowed aggregation of moments representing one
/// narrative unit.
///
/// Beats are created once per segmentation run and never mutated afterward.
/// Invariants: `start_seconds <= end_seconds`; beats within an episode are
/// time-ordered and non-overlapping; every moment belongs to exactly one beat.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Beat {
    /// Composite identifier, unique within the episode (e.g. `ep01_beat_003`)
    pub id: String,

    /// Episode this beat belongs to
    pub episode_id: String,

    /// Start timestamp (`H:MM:SS`)
    pub start: String,

    /// End timestamp (`H:MM:SS`)
    pub end: String,

    /// Start time in seconds
    pub start_seconds: f64,

    /// End time in seconds
    pub end_seconds: f64,

    /// Union of characters present across constituent moments (sorted)
    #[serde(default)]
    pub characters: Vec<String>,

    /// Dominant location, or `"multiple"` when the moments disagree
    #[serde(default)]
    pub location: String,

    /// One-line summary derived from the dominant content type
    #[serde(default)]
    pub summary: String,

    /// Rounded mean intensity of constituent moments (1-5)
    pub intensity: u8,

    /// Distinct content types observed (sorted)
    #[serde(default)]
    pub content_types: Vec<String>,

    /// Timestamps of constituent moments, in order
    #[serde(default)]
    pub moment_timestamps: Vec<String>,
}

impl Beat {
    /// Duration of the beat in seconds.
    pub fn duration_seconds(&self) -> f64 {
        (self.end_seconds - self.start_seconds).max(0.0)
    }

    /// Number of constituent moments.
    pub fn moment_count(&self) -> usize {
        self.moment_timestamps.len()
    }

    /// Whether a time in seconds falls within this beat (inclusive bounds).
    pub fn contains_time(&self, seconds: f64) -> bool {
        seconds >= self.start_seconds && seconds <= self.end_seconds
    }
}

/// Beats output envelope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BeatsFile {
    /// Schema/producer version
    pub version: String,

    /// Total beats across all episodes
    pub total_beats: usize,

    /// All beats, grouped by episode in input order
    pub beats: Vec<Beat>,
}

impl BeatsFile {
    /// Wrap a beat collection in the output envelope.
    pub fn new(version: impl Into<String>, beats: Vec<Beat>) -> Self {
        Self {
            version: version.into(),
            total_beats: beats.len(),
            beats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_beat() -> Beat {
        Beat {
            id: "ep01_beat_001".to_string(),
            episode_id: "ep01".to_string(),
            start: "0:00:00".to_string(),
            end: "0:01:30".to_string(),
            start_seconds: 0.0,
            end_seconds: 90.0,
            characters: vec!["kiara".to_string()],
            location: "mansion".to_string(),
            summary: "Feeding: test".to_string(),
            intensity: 3,
            content_types: vec!["feeding".to_string()],
            moment_timestamps: vec!["0:00:00".to_string(), "0:01:30".to_string()],
        }
    }

    #[test]
    fn test_duration_and_count() {
        let beat = test_beat();
        assert_eq!(beat.duration_seconds(), 90.0);
        assert_eq!(beat.moment_count(), 2);
    }

    #[test]
    fn test_contains_time_inclusive() {
        let beat = test_beat();
        assert!(beat.contains_time(0.0));
        assert!(beat.contains_time(90.0));
        assert!(beat.contains_time(45.0));
        assert!(!beat.contains_time(90.1));
    }

    #[test]
    fn test_beats_file_totals() {
        let file = BeatsFile::new("0.1.0", vec![test_beat()]);
        assert_eq!(file.total_beats, 1);
        assert_eq!(file.version, "0.1.0");
    }
}
