//! JSON file loading and output writing for the runner binary.
//!
//! The analysis core consumes already-parsed collections; everything here
//! belongs to the orchestration shell. Missing input files degrade to empty
//! collections so a partial data set still produces a (gated) run.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use sbeat_models::{CausalityGraph, EpisodeMoments, MutationDeck, TagLibrary};

use crate::error::PipelineResult;
use crate::runner::PipelineOutput;

/// Load every `*.json` episode file from a directory, sorted by file name so
/// episode order is stable across runs.
pub fn load_episodes(dir: &Path) -> PipelineResult<Vec<EpisodeMoments>> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "Episodes directory missing, continuing with none");
        return Ok(Vec::new());
    }

    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut episodes = Vec::with_capacity(paths.len());
    for path in paths {
        let contents = fs::read_to_string(&path)?;
        let episode: EpisodeMoments = serde_json::from_str(&contents)?;
        debug!(
            path = %path.display(),
            episode_id = %episode.episode_id,
            moments = episode.key_moments.len(),
            "Loaded episode moments"
        );
        episodes.push(episode);
    }
    Ok(episodes)
}

/// Load the mutation deck, or an empty deck when the file is absent.
pub fn load_mutation_deck(path: &Path) -> PipelineResult<MutationDeck> {
    if !path.is_file() {
        warn!(path = %path.display(), "Mutation deck missing, continuing with none");
        return Ok(MutationDeck::default());
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Load the causality graph, or an empty graph when the file is absent.
pub fn load_causality_graph(path: &Path) -> PipelineResult<CausalityGraph> {
    if !path.is_file() {
        warn!(path = %path.display(), "Causality edges missing, continuing with none");
        return Ok(CausalityGraph::default());
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Load the tag library when present; it only describes the vocabulary.
pub fn load_tag_library(path: &Path) -> PipelineResult<Option<TagLibrary>> {
    if !path.is_file() {
        debug!(path = %path.display(), "Tag library missing, skipping vocabulary check");
        return Ok(None);
    }
    let contents = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&contents)?))
}

/// Write the three output envelopes as pretty-printed JSON.
pub fn write_outputs(dir: &Path, output: &PipelineOutput) -> PipelineResult<()> {
    fs::create_dir_all(dir)?;
    write_json(&dir.join("beats.json"), &output.beats)?;
    write_json(&dir.join("signatures.json"), &output.signatures)?;
    write_json(&dir.join("ripple_previews.json"), &output.previews)?;
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> PipelineResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), "Wrote output file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_inputs_degrade_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        assert!(load_episodes(&missing).unwrap().is_empty());
        assert!(load_mutation_deck(&missing.join("cards.json"))
            .unwrap()
            .cards
            .is_empty());
        assert!(load_causality_graph(&missing.join("edges.json"))
            .unwrap()
            .edges
            .is_empty());
    }

    #[test]
    fn test_load_episodes_sorted_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("ep02.json"),
            r#"{"episode_id": "ep02", "key_moments": []}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("ep01.json"),
            r#"{"episode_id": "ep01", "key_moments": []}"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let episodes = load_episodes(dir.path()).unwrap();
        let ids: Vec<&str> = episodes.iter().map(|e| e.episode_id.as_str()).collect();
        assert_eq!(ids, vec!["ep01", "ep02"]);
    }

    #[test]
    fn test_malformed_episode_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "{").unwrap();
        assert!(load_episodes(dir.path()).is_err());
    }
}
