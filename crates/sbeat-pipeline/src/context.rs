//! Pipeline context — the explicitly constructed stage bundle.
//!
//! The caller builds one context, passes it by reference through the run,
//! and drops it at the end; the stages themselves hold no ambient state.

use sbeat_analysis::{BeatSegmenter, RippleEngine, SegmenterConfig, SignatureBuilder, TagMapper};

use crate::config::PipelineConfig;

/// Owns the configured pipeline stages for one or more runs.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub config: PipelineConfig,
    pub segmenter: BeatSegmenter,
    pub signatures: SignatureBuilder,
    pub ripple: RippleEngine,
}

impl PipelineContext {
    /// Construct the stage bundle from a pipeline configuration.
    pub fn new(config: PipelineConfig) -> Self {
        let segmenter = BeatSegmenter::new(SegmenterConfig {
            window_seconds: config.window_seconds,
        });
        Self {
            config,
            segmenter,
            signatures: SignatureBuilder::new(TagMapper::new()),
            ripple: RippleEngine::new(),
        }
    }

    /// Construct with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PipelineConfig::default())
    }
}
