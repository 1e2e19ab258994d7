//! Signature aggregation — normalized tag-frequency vectors.
//!
//! Beat-level vectors count one increment per tag per in-range moment and
//! normalize by the grand total. Episode-level vectors sum the *beat
//! fractions* and renormalize, so every beat contributes equal total weight
//! to its episode regardless of how many moments it contains.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use sbeat_models::{Beat, BeatSignature, EpisodeSignature, Moment};

use crate::tags::TagMapper;

/// Dominant tags kept on a beat signature.
const BEAT_DOMINANT_TAGS: usize = 5;

/// Dominant tags kept on an episode signature.
const EPISODE_DOMINANT_TAGS: usize = 10;

/// Builds tag-frequency signatures at beat and episode granularity.
#[derive(Debug, Clone, Default)]
pub struct SignatureBuilder {
    mapper: TagMapper,
}

impl SignatureBuilder {
    /// Create a builder around the given tag mapper.
    pub fn new(mapper: TagMapper) -> Self {
        Self { mapper }
    }

    /// Get the tag mapper.
    pub fn mapper(&self) -> &TagMapper {
        &self.mapper
    }

    /// Build the normalized tag-frequency vector for one beat.
    ///
    /// Every moment whose resolved time falls within the beat's inclusive
    /// time range contributes one increment per tag. Moments with
    /// unresolvable timestamps are ignored here; segmentation has already
    /// rejected them on the pipeline path.
    pub fn beat_signature(&self, beat: &Beat, moments: &[Moment]) -> BeatSignature {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut content_types: BTreeSet<String> = BTreeSet::new();
        let mut total: u64 = 0;

        for moment in moments {
            let time = match moment.resolved_seconds() {
                Ok(t) => t,
                Err(_) => continue,
            };
            if !beat.contains_time(time) {
                continue;
            }
            if !moment.content_type.is_empty() {
                content_types.insert(moment.content_type.clone());
            }
            for tag in self.mapper.tags_for(moment) {
                if !counts.contains_key(&tag) {
                    order.push(tag.clone());
                }
                *counts.entry(tag).or_insert(0) += 1;
                total += 1;
            }
        }

        let frequencies = if total == 0 {
            Default::default()
        } else {
            order
                .iter()
                .map(|tag| (tag.clone(), counts[tag] as f64 / total as f64))
                .collect()
        };

        let dominant_tags = ranked_tags(&order, |tag| counts[tag] as f64, BEAT_DOMINANT_TAGS);

        debug!(
            beat_id = %beat.id,
            tags = order.len(),
            increments = total,
            "Built beat signature"
        );

        BeatSignature {
            beat_id: beat.id.clone(),
            episode_id: beat.episode_id.clone(),
            frequencies,
            dominant_tags,
            content_types: content_types.into_iter().collect(),
        }
    }

    /// Build the episode-level vector from the episode's beat signatures.
    ///
    /// Sums per-tag beat fractions (not raw moment counts) and renormalizes,
    /// weighting each beat equally.
    pub fn episode_signature(
        &self,
        episode_id: &str,
        beat_signatures: &[BeatSignature],
    ) -> EpisodeSignature {
        let mut order: Vec<String> = Vec::new();
        let mut sums: HashMap<String, f64> = HashMap::new();
        let mut beat_count = 0usize;

        for signature in beat_signatures {
            if signature.episode_id != episode_id {
                continue;
            }
            beat_count += 1;
            for (tag, fraction) in &signature.frequencies {
                if !sums.contains_key(tag) {
                    order.push(tag.clone());
                }
                *sums.entry(tag.clone()).or_insert(0.0) += fraction;
            }
        }

        let grand_total: f64 = sums.values().sum();
        let frequencies = if grand_total <= 0.0 {
            Default::default()
        } else {
            order
                .iter()
                .map(|tag| (tag.clone(), sums[tag] / grand_total))
                .collect()
        };

        let dominant_tags = ranked_tags(&order, |tag| sums[tag], EPISODE_DOMINANT_TAGS);

        EpisodeSignature {
            episode_id: episode_id.to_string(),
            beat_count,
            frequencies,
            dominant_tags,
        }
    }
}

/// Rank tags descending by value, keeping at most `limit`. The sort is
/// stable over encounter order, so equal values keep their first-seen order.
fn ranked_tags(order: &[String], value: impl Fn(&str) -> f64, limit: usize) -> Vec<String> {
    let mut ranked: Vec<&String> = order.iter().collect();
    ranked.sort_by(|a, b| {
        value(b)
            .partial_cmp(&value(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.into_iter().take(limit).cloned().collect()
}
