//! Batch pipeline runner.
//!
//! Drives the three analysis stages over fully materialized inputs and
//! assembles the versioned output envelopes. Episodes are independent; the
//! run processes them in input order so output is stable across re-runs.

use tracing::{debug, info, warn};
use validator::Validate;

use sbeat_models::{
    BeatSignature, BeatsFile, CausalityGraph, EpisodeMoments, MutationDeck, RipplePreview,
    RipplePreviewsFile, SignaturesFile, TagLibrary,
};

use crate::context::PipelineContext;
use crate::error::{PipelineError, PipelineResult};
use crate::validation;

/// Version stamped into every output envelope.
const OUTPUT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fully materialized pipeline input.
#[derive(Debug, Clone, Default)]
pub struct PipelineInput {
    pub episodes: Vec<EpisodeMoments>,
    pub deck: MutationDeck,
    pub graph: CausalityGraph,
    /// Curated vocabulary, only used to flag tags outside it
    pub tag_library: Option<TagLibrary>,
}

/// Fully materialized pipeline output.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub beats: BeatsFile,
    pub signatures: SignaturesFile,
    pub previews: RipplePreviewsFile,
}

/// Run segmentation, signature aggregation, and ripple propagation over the
/// input, then apply the post-run validation gates.
pub fn run(ctx: &PipelineContext, input: &PipelineInput) -> PipelineResult<PipelineOutput> {
    let mut all_beats = Vec::new();
    let mut beat_signatures: Vec<BeatSignature> = Vec::new();
    let mut episode_signatures = Vec::new();

    for episode in &input.episodes {
        if episode.key_moments.is_empty() {
            debug!(episode_id = %episode.episode_id, "Episode has no moments, skipping");
            continue;
        }

        let beats = ctx
            .segmenter
            .segment(&episode.episode_id, &episode.key_moments)?;

        let signatures: Vec<BeatSignature> = beats
            .iter()
            .map(|beat| ctx.signatures.beat_signature(beat, &episode.key_moments))
            .collect();
        episode_signatures.push(
            ctx.signatures
                .episode_signature(&episode.episode_id, &signatures),
        );

        info!(
            episode_id = %episode.episode_id,
            moments = episode.key_moments.len(),
            beats = beats.len(),
            "Episode analyzed"
        );

        all_beats.extend(beats);
        beat_signatures.extend(signatures);
    }

    let mut previews: Vec<RipplePreview> = Vec::new();
    for card in &input.deck.cards {
        card.validate()
            .map_err(|e| PipelineError::InvalidCard(card.card_id.clone(), e))?;
        let preview = ctx.ripple.preview(card, &input.graph, &all_beats);
        debug!(
            card_id = %card.card_id,
            effects = preview.ripples.len(),
            "Ripple preview generated"
        );
        previews.push(preview);
    }

    let output = PipelineOutput {
        beats: BeatsFile::new(OUTPUT_VERSION, all_beats),
        signatures: SignaturesFile::new(OUTPUT_VERSION, beat_signatures, episode_signatures),
        previews: RipplePreviewsFile::new(OUTPUT_VERSION, previews),
    };

    if let Some(library) = &input.tag_library {
        report_unknown_tags(library, &output.signatures);
    }

    validation::validate_output(&ctx.config, input, &output)?;

    info!(
        total_beats = output.beats.total_beats,
        beat_signatures = output.signatures.totals.beat_signatures,
        episode_signatures = output.signatures.totals.episode_signatures,
        previews = output.previews.total_previews,
        "Pipeline run complete"
    );

    Ok(output)
}

/// Flag signature tags missing from the curated vocabulary. Advisory only;
/// the mapping rules do not depend on the library.
fn report_unknown_tags(library: &TagLibrary, signatures: &SignaturesFile) {
    let mut unknown: std::collections::BTreeSet<&str> = Default::default();
    for signature in &signatures.beat_signatures {
        for tag in signature.frequencies.keys() {
            if !library.contains(tag) {
                unknown.insert(tag.as_str());
            }
        }
    }
    if !unknown.is_empty() {
        let listed = unknown.iter().copied().collect::<Vec<_>>().join(", ");
        warn!(
            count = unknown.len(),
            tags = %listed,
            "Signature tags missing from tag library"
        );
    }
}
