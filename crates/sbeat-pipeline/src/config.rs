//! Pipeline configuration.

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Segmentation window in seconds
    pub window_seconds: f64,
    /// Minimum total beats the run must produce
    pub min_total_beats: usize,
    /// Minimum ripple effects each mutation card must yield
    pub min_ripples_per_card: usize,
    /// Require a signature for every episode that supplied moments
    pub require_episode_signatures: bool,
    /// Directory of per-episode moment JSON files
    pub episodes_dir: String,
    /// Mutation deck JSON file
    pub mutations_file: String,
    /// Causality edges JSON file
    pub edges_file: String,
    /// Tag library JSON file (optional, used to flag unknown tags)
    pub tag_library_file: String,
    /// Directory the output files are written to
    pub output_dir: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_seconds: 100.0,
            min_total_beats: 1,
            min_ripples_per_card: 1,
            require_episode_signatures: true,
            episodes_dir: "data/episodes".to_string(),
            mutations_file: "data/mutation_cards.json".to_string(),
            edges_file: "data/causality_edges.json".to_string(),
            tag_library_file: "data/tag_library.json".to_string(),
            output_dir: "out".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            window_seconds: std::env::var("SBEAT_WINDOW_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100.0),
            min_total_beats: std::env::var("SBEAT_MIN_TOTAL_BEATS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
            min_ripples_per_card: std::env::var("SBEAT_MIN_RIPPLES_PER_CARD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
            require_episode_signatures: std::env::var("SBEAT_REQUIRE_EPISODE_SIGNATURES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
            episodes_dir: std::env::var("SBEAT_EPISODES_DIR")
                .unwrap_or_else(|_| "data/episodes".to_string()),
            mutations_file: std::env::var("SBEAT_MUTATIONS_FILE")
                .unwrap_or_else(|_| "data/mutation_cards.json".to_string()),
            edges_file: std::env::var("SBEAT_EDGES_FILE")
                .unwrap_or_else(|_| "data/causality_edges.json".to_string()),
            tag_library_file: std::env::var("SBEAT_TAG_LIBRARY_FILE")
                .unwrap_or_else(|_| "data/tag_library.json".to_string()),
            output_dir: std::env::var("SBEAT_OUTPUT_DIR").unwrap_or_else(|_| "out".to_string()),
        }
    }
}
