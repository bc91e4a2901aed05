//! Pure analytics over a [`FamilyGraph`](crate::FamilyGraph)

pub mod birth_year;
pub mod families;
pub mod generation;
pub mod lineage;
pub mod quality;
pub mod report;

pub use birth_year::{birth_year, find_birth_year, DEFAULT_BIRTH_YEAR};
pub use families::{family_sizes, largest_families, FamilySize, DEFAULT_TOP_FAMILIES};
pub use generation::{bucket_generations, Generation, GenerationBuckets};
pub use lineage::{longest_lineage, Lineage, LineageStats};
pub use quality::{find_data_issues, DataIssues, IssueCategory, QualityIssue, QualityRules};
pub use report::{analyze, AnalysisOptions, AnalysisReport, GenerationCount, LineageEntry};
