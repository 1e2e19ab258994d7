//! Narrative analysis core for StoryBeat.
//!
//! Three pure, synchronous batch stages over immutable inputs:
//! - Beat segmentation: time-windowed grouping of episode moments
//! - Tag mapping + signature aggregation: normalized tag-frequency vectors
//!   at beat and episode granularity
//! - Ripple propagation: order-capped prediction of a mutation's downstream
//!   effects
//!
//! Re-running any stage on unchanged input reproduces identical output; the
//! stages hold no shared mutable state.

pub mod error;
pub mod ripple;
pub mod segmenter;
pub mod signatures;
pub mod tags;
pub mod text;

pub use error::{AnalysisError, AnalysisResult};
pub use ripple::RippleEngine;
pub use segmenter::{BeatSegmenter, SegmenterConfig};
pub use signatures::SignatureBuilder;
pub use tags::TagMapper;
