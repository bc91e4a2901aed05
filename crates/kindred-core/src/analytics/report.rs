//! Combined analysis report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::families::{largest_families, FamilySize, DEFAULT_TOP_FAMILIES};
use super::generation::{bucket_generations, Generation};
use super::lineage::longest_lineage;
use super::quality::{find_data_issues, DataIssues, QualityRules};
use crate::error::Result;
use crate::graph::{FamilyGraph, GraphStatistics};
use crate::person::PersonId;
use crate::validate::{validate, ValidationIssue};

/// Knobs for [`analyze`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub top_families: usize,
    pub rules: QualityRules,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_families: DEFAULT_TOP_FAMILIES,
            rules: QualityRules::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationCount {
    pub generation: Generation,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageEntry {
    pub id: PersonId,
    pub name: String,
}

/// Everything the validator and the analytics know about a graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub statistics: GraphStatistics,
    pub validation: Vec<ValidationIssue>,
    pub data_issues: DataIssues,
    pub generations: Vec<GenerationCount>,
    pub largest_families: Vec<FamilySize>,
    pub longest_lineage: Vec<LineageEntry>,
}

impl AnalysisReport {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn analyze(graph: &FamilyGraph, options: &AnalysisOptions) -> AnalysisReport {
    let generations = bucket_generations(graph)
        .counts()
        .into_iter()
        .map(|(generation, count)| GenerationCount {
            generation,
            label: generation.label().to_string(),
            count,
        })
        .collect();

    let longest_lineage = longest_lineage(graph)
        .path
        .into_iter()
        .map(|id| LineageEntry {
            id,
            name: graph.display_name(id),
        })
        .collect();

    AnalysisReport {
        generated_at: Utc::now(),
        statistics: graph.statistics(),
        validation: validate(graph),
        data_issues: find_data_issues(graph, &options.rules),
        generations,
        largest_families: largest_families(graph, options.top_families),
        longest_lineage,
    }
}
