//! Kindred Core - Family graph engine
//!
//! This crate parses the family notation into a [`FamilyGraph`], checks its
//! referential integrity and derives analytics (generations, largest
//! families, longest lineage, data-quality heuristics).

pub mod analytics;
pub mod error;
pub mod graph;
pub mod parser;
pub mod person;
pub mod relation;
pub mod validate;

pub use analytics::{analyze, AnalysisOptions, AnalysisReport, Generation, QualityRules};
pub use error::{Error, Result};
pub use graph::{FamilyGraph, GraphStatistics};
pub use parser::{parse_file, parse_line, parse_str, ChildrenClause, Line, Spouse};
pub use person::{Person, PersonId, PLACEHOLDER_ID_START, UNKNOWN_MARKER};
pub use relation::{Couple, Relation, RelationKind};
pub use validate::{validate, Role, ValidationIssue};
