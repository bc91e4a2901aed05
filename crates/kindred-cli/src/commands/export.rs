//! Export command

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use kindred_render::{render_vector, synthesize_with, to_dot, write_dot, GraphvizRenderer};
use tracing::warn;

use super::{load_graph, resolve_source, source_dir};
use crate::AppContext;

/// Export format
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum ExportFormat {
    /// Graphviz DOT source
    #[default]
    Dot,
    /// Synthesized scene as JSON
    Json,
    /// Normalized notation
    Notation,
    /// Post-processed vector image only
    Svg,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Source file (default: source.txt here or in the parent directory)
    pub source: Option<PathBuf>,

    /// What to export
    #[arg(long = "as", value_enum, default_value = "dot")]
    pub kind: ExportFormat,

    /// Output file (stdout if omitted; svg defaults to <output_name>_vector.svg beside the source)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Graphviz layout program to run for svg
    #[arg(long)]
    pub dot_program: Option<PathBuf>,
}

pub fn run(args: &ExportArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let source = resolve_source(args.source.as_deref());
    let graph = load_graph(&source)?;
    let scene = synthesize_with(&graph, &ctx.config.scene_options());

    let content = match args.kind {
        ExportFormat::Dot => to_dot(&scene),
        ExportFormat::Json => scene.to_json_pretty()?,
        ExportFormat::Notation => graph.to_notation(),
        ExportFormat::Svg => {
            let path = args.output.clone().unwrap_or_else(|| {
                source_dir(&source).join(format!("{}_vector.svg", ctx.config.render.output_name))
            });
            let program = args
                .dot_program
                .clone()
                .unwrap_or_else(|| PathBuf::from(&ctx.config.render.program));
            match render_vector(&scene, &GraphvizRenderer::new(program), &path) {
                Ok(_) => println!("Exported to {}", path.display()),
                Err(e) => {
                    warn!(error = %e, output = %path.display(), "Rendering failed, writing DOT source instead");
                    let dot = write_dot(&to_dot(&scene), &path.with_extension(""))
                        .context("Failed to write DOT fallback")?;
                    println!("Rendering failed: {e}");
                    println!("DOT source saved as {}", dot.display());
                }
            }
            return Ok(());
        }
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Exported to {}", path.display());
    } else {
        print!("{content}");
        if !content.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
