//! Post-run validation gates.
//!
//! Coarse pipeline-level assertions, not per-record recoverable errors: a
//! failed gate halts the run with a descriptive message.

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::runner::{PipelineInput, PipelineOutput};

/// Apply every gate to a finished run.
pub fn validate_output(
    config: &PipelineConfig,
    input: &PipelineInput,
    output: &PipelineOutput,
) -> PipelineResult<()> {
    ensure_min_beats(config, output)?;
    ensure_episode_signatures(config, input, output)?;
    ensure_card_ripples(config, output)?;
    Ok(())
}

fn ensure_min_beats(config: &PipelineConfig, output: &PipelineOutput) -> PipelineResult<()> {
    if output.beats.total_beats < config.min_total_beats {
        return Err(PipelineError::validation(format!(
            "expected at least {} beats, got {}",
            config.min_total_beats, output.beats.total_beats
        )));
    }
    Ok(())
}

fn ensure_episode_signatures(
    config: &PipelineConfig,
    input: &PipelineInput,
    output: &PipelineOutput,
) -> PipelineResult<()> {
    if !config.require_episode_signatures {
        return Ok(());
    }
    for episode in &input.episodes {
        if episode.key_moments.is_empty() {
            continue;
        }
        let present = output
            .signatures
            .episode_signatures
            .iter()
            .any(|sig| sig.episode_id == episode.episode_id);
        if !present {
            return Err(PipelineError::validation(format!(
                "episode '{}' produced no signature",
                episode.episode_id
            )));
        }
    }
    Ok(())
}

fn ensure_card_ripples(config: &PipelineConfig, output: &PipelineOutput) -> PipelineResult<()> {
    for preview in &output.previews.previews {
        if preview.ripples.len() < config.min_ripples_per_card {
            return Err(PipelineError::validation(format!(
                "card '{}' yielded {} ripple effects, expected at least {}",
                preview.source_card,
                preview.ripples.len(),
                config.min_ripples_per_card
            )));
        }
    }
    Ok(())
}
