//! Tag-frequency signature models.
//!
//! A signature is a normalized frequency vector over the tag vocabulary.
//! `BTreeMap` keeps serialized output stable across runs; non-empty vectors
//! sum to ~1.0.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Thematic/tonal composition of a single beat.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BeatSignature {
    /// Beat this signature describes
    pub beat_id: String,

    /// Episode the beat belongs to
    pub episode_id: String,

    /// Normalized tag fractions (empty when no tags were observed)
    #[serde(default)]
    pub frequencies: BTreeMap<String, f64>,

    /// Top tags by fraction, descending (at most 5)
    #[serde(default)]
    pub dominant_tags: Vec<String>,

    /// Distinct content types observed in the beat's moments
    #[serde(default)]
    pub content_types: Vec<String>,
}

impl BeatSignature {
    /// Sum of all tag fractions (~1.0 for non-empty signatures).
    pub fn total_weight(&self) -> f64 {
        self.frequencies.values().sum()
    }
}

/// Thematic/tonal composition of a whole episode, aggregated from its beats.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EpisodeSignature {
    /// Episode this signature describes
    pub episode_id: String,

    /// Number of beats that contributed
    pub beat_count: usize,

    /// Normalized tag fractions (empty when no beat carried tags)
    #[serde(default)]
    pub frequencies: BTreeMap<String, f64>,

    /// Top tags by fraction, descending (at most 10)
    #[serde(default)]
    pub dominant_tags: Vec<String>,
}

impl EpisodeSignature {
    /// Sum of all tag fractions (~1.0 for non-empty signatures).
    pub fn total_weight(&self) -> f64 {
        self.frequencies.values().sum()
    }
}

/// Signature counts for the output envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SignatureTotals {
    pub beat_signatures: usize,
    pub episode_signatures: usize,
    /// Distinct tags observed across all beat signatures
    pub distinct_tags: usize,
}

/// Signatures output envelope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SignaturesFile {
    /// Schema/producer version
    pub version: String,

    pub beat_signatures: Vec<BeatSignature>,

    pub episode_signatures: Vec<EpisodeSignature>,

    pub totals: SignatureTotals,
}

impl SignaturesFile {
    /// Wrap signature collections in the output envelope, computing totals.
    pub fn new(
        version: impl Into<String>,
        beat_signatures: Vec<BeatSignature>,
        episode_signatures: Vec<EpisodeSignature>,
    ) -> Self {
        let mut distinct = std::collections::BTreeSet::new();
        for sig in &beat_signatures {
            distinct.extend(sig.frequencies.keys().cloned());
        }
        let totals = SignatureTotals {
            beat_signatures: beat_signatures.len(),
            episode_signatures: episode_signatures.len(),
            distinct_tags: distinct.len(),
        };
        Self {
            version: version.into(),
            beat_signatures,
            episode_signatures,
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_weight() {
        let mut frequencies = BTreeMap::new();
        frequencies.insert("dread".to_string(), 0.25);
        frequencies.insert("hunger".to_string(), 0.75);
        let sig = BeatSignature {
            beat_id: "ep01_beat_001".to_string(),
            episode_id: "ep01".to_string(),
            frequencies,
            dominant_tags: vec!["hunger".to_string(), "dread".to_string()],
            content_types: vec![],
        };
        assert!((sig.total_weight() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_signatures_file_totals() {
        let mut a = BTreeMap::new();
        a.insert("hunger".to_string(), 1.0);
        let mut b = BTreeMap::new();
        b.insert("hunger".to_string(), 0.5);
        b.insert("dread".to_string(), 0.5);

        let beat_sigs = vec![
            BeatSignature {
                beat_id: "ep01_beat_001".to_string(),
                episode_id: "ep01".to_string(),
                frequencies: a,
                dominant_tags: vec![],
                content_types: vec![],
            },
            BeatSignature {
                beat_id: "ep01_beat_002".to_string(),
                episode_id: "ep01".to_string(),
                frequencies: b,
                dominant_tags: vec![],
                content_types: vec![],
            },
        ];
        let file = SignaturesFile::new("0.1.0", beat_sigs, vec![]);
        assert_eq!(file.totals.beat_signatures, 2);
        assert_eq!(file.totals.episode_signatures, 0);
        assert_eq!(file.totals.distinct_tags, 2);
    }
}
