//! CLI command implementations

pub mod build;
pub mod check;
pub mod completions;
pub mod config;
pub mod export;
pub mod stats;
pub mod svg;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use kindred_core::{parse_file, FamilyGraph};

use crate::report::MISSING_SOURCE_HELP;

/// Source file name looked up when none is given
pub const DEFAULT_SOURCE: &str = "source.txt";

/// The explicit source, else `source.txt` here, else `../source.txt`
pub fn resolve_source(source: Option<&Path>) -> PathBuf {
    if let Some(path) = source {
        return path.to_path_buf();
    }
    let local = PathBuf::from(DEFAULT_SOURCE);
    if local.exists() {
        return local;
    }
    let parent = Path::new("..").join(DEFAULT_SOURCE);
    if parent.exists() {
        return parent;
    }
    local
}

/// Parse the source, turning a missing file into guidance for the user
pub fn load_graph(source: &Path) -> anyhow::Result<FamilyGraph> {
    match parse_file(source) {
        Ok(graph) => {
            tracing::info!(
                people = graph.person_count(),
                relations = graph.relations().len(),
                "Loaded {}",
                source.display()
            );
            Ok(graph)
        }
        Err(e) if e.is_source_missing() => {
            bail!(
                "source file {} not found\n\n{}",
                source.display(),
                MISSING_SOURCE_HELP
            )
        }
        Err(e) => Err(e).with_context(|| format!("Failed to load {}", source.display())),
    }
}

/// Directory holding the source file, used for default outputs
pub fn source_dir(source: &Path) -> PathBuf {
    let absolute = if source.is_absolute() {
        source.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(source))
            .unwrap_or_else(|_| source.to_path_buf())
    };
    absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
