//! StoryBeat pipeline runner binary.

use std::path::Path;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sbeat_pipeline::{io, runner, PipelineConfig, PipelineContext, PipelineInput};

fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("sbeat=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting sbeat-pipeline");

    // Load configuration
    let config = PipelineConfig::from_env();
    info!("Pipeline config: {:?}", config);

    if let Err(e) = run_pipeline(config) {
        error!("Pipeline failed: {}", e);
        std::process::exit(1);
    }

    info!("Pipeline shutdown complete");
}

fn run_pipeline(config: PipelineConfig) -> anyhow::Result<()> {
    let input = PipelineInput {
        episodes: io::load_episodes(Path::new(&config.episodes_dir))?,
        deck: io::load_mutation_deck(Path::new(&config.mutations_file))?,
        graph: io::load_causality_graph(Path::new(&config.edges_file))?,
        tag_library: io::load_tag_library(Path::new(&config.tag_library_file))?,
    };

    info!(
        episodes = input.episodes.len(),
        cards = input.deck.cards.len(),
        edges = input.graph.edges.len(),
        "Inputs loaded"
    );

    let output_dir = config.output_dir.clone();
    let ctx = PipelineContext::new(config);
    let output = runner::run(&ctx, &input)?;

    io::write_outputs(Path::new(&output_dir), &output)?;

    info!(
        total_beats = output.beats.total_beats,
        previews = output.previews.total_previews,
        output_dir = %output_dir,
        "Outputs written"
    );

    Ok(())
}
