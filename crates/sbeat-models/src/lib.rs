//! Shared data models for the StoryBeat pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Episode moments (the upstream analysis input)
//! - Narrative beats and the beats output envelope
//! - Tag-frequency signatures at beat and episode granularity
//! - Mutation cards, causality edges, and ripple previews

pub mod beat;
pub mod moment;
pub mod mutation;
pub mod ripple;
pub mod signature;
pub mod tag_library;
pub mod timestamp;

// Re-export common types
pub use beat::{Beat, BeatsFile};
pub use moment::{EpisodeMoments, Moment};
pub use mutation::{CausalityEdge, CausalityGraph, MutationCard, MutationDeck};
pub use ripple::{Magnitude, RippleEffect, RipplePreview, RipplePreviewsFile, RippleType};
pub use signature::{BeatSignature, EpisodeSignature, SignatureTotals, SignaturesFile};
pub use tag_library::TagLibrary;
pub use timestamp::{format_timestamp, parse_timestamp, TimestampError};
