//! Fix-svg command

use std::path::PathBuf;

use clap::Args;
use kindred_render::fix_svg_file;

#[derive(Args)]
pub struct FixSvgArgs {
    /// SVG file rendered by Graphviz
    pub file: PathBuf,
}

pub fn run(args: &FixSvgArgs) -> anyhow::Result<()> {
    match fix_svg_file(&args.file) {
        Some(viewbox) => {
            println!("SVG viewBox fixed: {viewbox}");
            Ok(())
        }
        None => anyhow::bail!("Could not fix {}; file left unchanged", args.file.display()),
    }
}
