//! CLI configuration

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use kindred_core::analytics::DEFAULT_TOP_FAMILIES;
use kindred_core::{AnalysisOptions, QualityRules};
use kindred_render::{GraphvizRenderer, SceneOptions};
use serde::{Deserialize, Serialize};

/// Default config file location
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kindred")
        .join("config.toml")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Graphviz layout program
    pub program: String,
    pub dpi: u32,
    /// Output base name, placed next to the source file
    pub output_name: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            program: GraphvizRenderer::DEFAULT_PROGRAM.to_string(),
            dpi: SceneOptions::default().dpi,
            output_name: "family_tree".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub top_families: usize,
    pub unknown_markers: Vec<String>,
    pub known_typos: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let rules = QualityRules::default();
        Self {
            top_families: DEFAULT_TOP_FAMILIES,
            unknown_markers: rules.unknown_markers,
            known_typos: rules.known_typos,
        }
    }
}

/// Configuration for the CLI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub analysis: AnalysisConfig,
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl Config {
    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &[
            "render.program",
            "render.dpi",
            "render.output_name",
            "analysis.top_families",
            "analysis.unknown_markers",
            "analysis.known_typos",
        ]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "render.program" => self.render.program.clone(),
            "render.dpi" => self.render.dpi.to_string(),
            "render.output_name" => self.render.output_name.clone(),
            "analysis.top_families" => self.analysis.top_families.to_string(),
            "analysis.unknown_markers" => self.analysis.unknown_markers.join(", "),
            "analysis.known_typos" => self.analysis.known_typos.join(", "),
            _ => return None,
        };
        Some(value)
    }

    /// Set a key from its string form; list keys take comma-separated values
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "render.program" => self.render.program = value.to_string(),
            "render.dpi" => {
                self.render.dpi = value
                    .parse::<NonZeroU32>()
                    .with_context(|| format!("render.dpi must be a positive integer, got '{value}'"))?
                    .get();
            }
            "render.output_name" => {
                if value.trim().is_empty() {
                    bail!("render.output_name cannot be empty");
                }
                self.render.output_name = value.to_string();
            }
            "analysis.top_families" => {
                self.analysis.top_families = value.parse().with_context(|| {
                    format!("analysis.top_families must be a non-negative integer, got '{value}'")
                })?;
            }
            "analysis.unknown_markers" => self.analysis.unknown_markers = split_list(value),
            "analysis.known_typos" => self.analysis.known_typos = split_list(value),
            _ => bail!(
                "Unknown config key: {key}. Available keys: {}",
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            top_families: self.analysis.top_families,
            rules: QualityRules {
                unknown_markers: self.analysis.unknown_markers.clone(),
                known_typos: self.analysis.known_typos.clone(),
            },
        }
    }

    pub fn scene_options(&self) -> SceneOptions {
        SceneOptions {
            dpi: self.render.dpi,
        }
    }
}
