//! Beat segmentation — groups an episode's moments into narrative beats.
//!
//! A running window is anchored at the first moment's time. Moments
//! accumulate until one falls a full window past the anchor, at which point
//! the open window closes into a `Beat` and a new window is anchored at the
//! current moment. The final partial window always flushes, so every moment
//! lands in exactly one beat.

use std::collections::BTreeSet;

use tracing::debug;

use sbeat_models::{format_timestamp, Beat, Moment};

use crate::error::{AnalysisError, AnalysisResult};
use crate::text::{title_case, truncate_chars};

/// Characters kept from a moment description in the beat summary.
const SUMMARY_DESCRIPTION_CHARS: usize = 50;

/// Intensity assigned when no constituent moment carries a rating.
const DEFAULT_INTENSITY: u8 = 1;

/// Configuration for beat segmentation.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Window length in seconds; a moment this far past the anchor closes
    /// the open beat
    pub window_seconds: f64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            window_seconds: 100.0,
        }
    }
}

/// Segments an episode's moments into time-windowed beats.
#[derive(Debug, Clone)]
pub struct BeatSegmenter {
    config: SegmenterConfig,
}

impl BeatSegmenter {
    /// Create a segmenter with the given configuration.
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Create a segmenter with the default window.
    pub fn with_defaults() -> Self {
        Self::new(SegmenterConfig::default())
    }

    /// Get the configuration.
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Segment an episode's moments into beats.
    ///
    /// Moments are expected in chronological order. Zero moments produce
    /// zero beats; a single moment produces one zero-duration beat. A moment
    /// whose timestamp cannot be resolved fails the whole segmentation —
    /// skipping it would drop it from the beat partition.
    pub fn segment(&self, episode_id: &str, moments: &[Moment]) -> AnalysisResult<Vec<Beat>> {
        if self.config.window_seconds <= 0.0 {
            return Err(AnalysisError::config(format!(
                "window_seconds must be positive, got {}",
                self.config.window_seconds
            )));
        }
        if moments.is_empty() {
            return Ok(Vec::new());
        }

        let mut beats: Vec<Beat> = Vec::new();
        let mut window: Vec<(&Moment, f64)> = Vec::new();
        let mut current_start = moments[0].resolved_seconds()?;

        for moment in moments {
            let time = moment.resolved_seconds()?;
            if time - current_start >= self.config.window_seconds && !window.is_empty() {
                beats.push(self.close_window(episode_id, beats.len() + 1, current_start, &window));
                window.clear();
                current_start = time;
            }
            window.push((moment, time));
        }

        if !window.is_empty() {
            beats.push(self.close_window(episode_id, beats.len() + 1, current_start, &window));
        }

        debug!(
            episode_id = %episode_id,
            moments = moments.len(),
            beats = beats.len(),
            window_seconds = self.config.window_seconds,
            "Segmented episode into beats"
        );

        Ok(beats)
    }

    /// Close an open window into a beat. Every field derives purely from the
    /// constituent moments.
    fn close_window(
        &self,
        episode_id: &str,
        sequence: usize,
        start_seconds: f64,
        window: &[(&Moment, f64)],
    ) -> Beat {
        let end_seconds = window
            .last()
            .map(|(_, t)| *t)
            .unwrap_or(start_seconds + self.config.window_seconds);

        let characters: Vec<String> = window
            .iter()
            .flat_map(|(m, _)| m.characters_present.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let locations: BTreeSet<&str> = window
            .iter()
            .filter_map(|(m, _)| m.location.as_deref())
            .collect();
        let location = match locations.len() {
            1 => locations.iter().next().map(|l| l.to_string()).unwrap_or_default(),
            _ => "multiple".to_string(),
        };

        let intensities: Vec<f64> = window
            .iter()
            .filter_map(|(m, _)| m.intensity.map(f64::from))
            .collect();
        let intensity = if intensities.is_empty() {
            DEFAULT_INTENSITY
        } else {
            (intensities.iter().sum::<f64>() / intensities.len() as f64).round() as u8
        };

        let content_types: Vec<String> = window
            .iter()
            .map(|(m, _)| m.content_type.as_str())
            .filter(|ct| !ct.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect();

        let summary = format!(
            "{}: {}...",
            title_case(dominant_content_type(window)),
            truncate_chars(
                window.first().map(|(m, _)| m.description.as_str()).unwrap_or(""),
                SUMMARY_DESCRIPTION_CHARS
            )
        );

        let moment_timestamps: Vec<String> =
            window.iter().map(|(m, _)| m.timestamp.clone()).collect();

        Beat {
            id: format!("{}_beat_{:03}", episode_id, sequence),
            episode_id: episode_id.to_string(),
            start: format_timestamp(start_seconds),
            end: format_timestamp(end_seconds),
            start_seconds,
            end_seconds,
            characters,
            location,
            summary,
            intensity,
            content_types,
            moment_timestamps,
        }
    }
}

/// Mode of the window's content types. Ties on the maximum count resolve to
/// the type seen first in the moment sequence.
fn dominant_content_type<'a>(window: &[(&'a Moment, f64)]) -> &'a str {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: Vec<u32> = Vec::new();

    for (moment, _) in window {
        let ct = moment.content_type.as_str();
        if ct.is_empty() {
            continue;
        }
        match order.iter().position(|seen| *seen == ct) {
            Some(i) => counts[i] += 1,
            None => {
                order.push(ct);
                counts.push(1);
            }
        }
    }

    let mut best = "scene";
    let mut best_count = 0;
    for (i, ct) in order.iter().enumerate() {
        if counts[i] > best_count {
            best = *ct;
            best_count = counts[i];
        }
    }
    best
}
