//! Build command: the full pipeline from notation to images

use std::path::PathBuf;

use clap::Args;
use kindred_core::{analyze, AnalysisReport};
use kindred_render::{render_outputs, synthesize_with, GraphvizRenderer, RenderOutcome};
use serde::Serialize;

use super::{load_graph, resolve_source, source_dir};
use crate::output::{print_json, OutputFormat};
use crate::report;
use crate::AppContext;

#[derive(Args)]
pub struct BuildArgs {
    /// Source file (default: source.txt here or in the parent directory)
    pub source: Option<PathBuf>,

    /// Output base path; `.png` and `_vector.svg` are appended
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only print the reports
    #[arg(long)]
    pub no_render: bool,

    /// Number of largest families to list
    #[arg(long)]
    pub top: Option<usize>,

    /// Graphviz layout program to run
    #[arg(long)]
    pub dot_program: Option<PathBuf>,
}

#[derive(Serialize)]
struct BuildOutput<'a> {
    source: &'a std::path::Path,
    report: &'a AnalysisReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    render: Option<&'a RenderOutcome>,
}

fn describe(outcome: &RenderOutcome) -> String {
    match outcome {
        RenderOutcome::Rendered { png, svg, viewbox } => {
            let mut text = format!("Family tree saved as:\n  - {}\n  - {}", png.display(), svg.display());
            if let Some(viewbox) = viewbox {
                text.push_str(&format!(" (viewBox {viewbox})"));
            }
            text
        }
        RenderOutcome::Fallback { dot, reason } => format!(
            "Rendering failed: {reason}\nDOT source saved as {}",
            dot.display()
        ),
    }
}

pub fn run(args: &BuildArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let source = resolve_source(args.source.as_deref());
    let graph = load_graph(&source)?;

    let mut options = ctx.config.analysis_options();
    if let Some(top) = args.top {
        options.top_families = top;
    }
    let analysis = analyze(&graph, &options);

    if ctx.format == OutputFormat::Text {
        print!("{}", report::validation_section(&analysis.validation));
        print!("{}", report::data_issues_section(&analysis.data_issues));
        print!("{}", report::analysis_section(&analysis));
        print!("{}", report::statistics_section(&analysis.statistics));
    }

    let outcome = if args.no_render {
        None
    } else {
        let base = args
            .output
            .clone()
            .unwrap_or_else(|| source_dir(&source).join(&ctx.config.render.output_name));
        let program = args
            .dot_program
            .clone()
            .unwrap_or_else(|| PathBuf::from(&ctx.config.render.program));

        let scene = synthesize_with(&graph, &ctx.config.scene_options());
        tracing::info!(
            nodes = scene.nodes.len(),
            edges = scene.edges.len(),
            "Scene synthesized"
        );
        Some(render_outputs(&scene, &GraphvizRenderer::new(program), &base)?)
    };

    match ctx.format {
        OutputFormat::Json => print_json(&BuildOutput {
            source: &source,
            report: &analysis,
            render: outcome.as_ref(),
        })?,
        OutputFormat::Text => {
            if let Some(outcome) = &outcome {
                println!("\n{}", describe(outcome));
            }
        }
    }

    Ok(())
}
