//! Check command: validation and data-quality heuristics

use std::path::PathBuf;

use clap::Args;
use kindred_core::analytics::{find_data_issues, DataIssues};
use kindred_core::{validate, ValidationIssue};
use serde::Serialize;

use super::{load_graph, resolve_source};
use crate::output::{print_json, OutputFormat};
use crate::report;
use crate::AppContext;

#[derive(Args)]
pub struct CheckArgs {
    /// Source file (default: source.txt here or in the parent directory)
    pub source: Option<PathBuf>,
}

#[derive(Serialize)]
struct CheckOutput {
    validation: Vec<ValidationIssue>,
    data_issues: DataIssues,
}

pub fn run(args: &CheckArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let source = resolve_source(args.source.as_deref());
    let graph = load_graph(&source)?;

    let output = CheckOutput {
        validation: validate(&graph),
        data_issues: find_data_issues(&graph, &ctx.config.analysis_options().rules),
    };

    match ctx.format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Text => {
            print!("{}", report::validation_section(&output.validation));
            print!("{}", report::data_issues_section(&output.data_issues));
        }
    }
    Ok(())
}
