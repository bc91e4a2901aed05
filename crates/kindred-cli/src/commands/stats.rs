//! Stats command

use std::path::PathBuf;

use clap::Args;
use kindred_core::analyze;

use super::{load_graph, resolve_source};
use crate::output::OutputFormat;
use crate::report;
use crate::AppContext;

#[derive(Args)]
pub struct StatsArgs {
    /// Source file (default: source.txt here or in the parent directory)
    pub source: Option<PathBuf>,

    /// Number of largest families to list
    #[arg(long)]
    pub top: Option<usize>,
}

pub fn run(args: &StatsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let source = resolve_source(args.source.as_deref());
    let graph = load_graph(&source)?;

    let mut options = ctx.config.analysis_options();
    if let Some(top) = args.top {
        options.top_families = top;
    }
    let analysis = analyze(&graph, &options);

    match ctx.format {
        OutputFormat::Json => println!("{}", analysis.to_json_pretty()?),
        OutputFormat::Text => {
            print!("{}", report::analysis_section(&analysis));
            print!("{}", report::statistics_section(&analysis.statistics));
        }
    }
    Ok(())
}
