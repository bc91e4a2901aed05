//! Rendering boundary
//!
//! The layout engine is an external collaborator behind the [`Renderer`]
//! trait. [`GraphvizRenderer`] drives the Graphviz `dot` program; anything
//! that turns DOT text into PNG/SVG files can stand in for it.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dot::to_dot;
use crate::error::{RenderError, RenderResult};
use crate::scene::Scene;
use crate::svg::{fix_svg_file, ViewBox};

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns DOT text into an image file
pub trait Renderer {
    /// Render `dot` as `format` into `output`
    fn render(&self, dot: &str, format: ImageFormat, output: &Path) -> RenderResult<()>;

    /// Renderer name for diagnostics
    fn name(&self) -> &str;
}

/// Renderer backed by the Graphviz command-line tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphvizRenderer {
    program: PathBuf,
}

impl GraphvizRenderer {
    pub const DEFAULT_PROGRAM: &'static str = "dot";

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl Renderer for GraphvizRenderer {
    fn render(&self, dot: &str, format: ImageFormat, output: &Path) -> RenderResult<()> {
        let program = self.program.display().to_string();
        debug!(program = %program, format = %format, output = %output.display(), "Running layout program");

        let mut child = Command::new(&self.program)
            .arg(format!("-T{format}"))
            .arg("-o")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::Launch {
                program: program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes())?;
        }

        let result = child.wait_with_output()?;
        if !result.status.success() {
            return Err(RenderError::Failed {
                program,
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "graphviz"
    }
}

/// What [`render_outputs`] produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RenderOutcome {
    Rendered {
        png: PathBuf,
        svg: PathBuf,
        /// `None` when the post-processor left the vector file untouched
        viewbox: Option<ViewBox>,
    },
    Fallback {
        dot: PathBuf,
        reason: String,
    },
}

impl RenderOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, RenderOutcome::Fallback { .. })
    }
}

/// `<base><suffix>` without touching any dots already in `base`
pub fn output_path(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Render the raster and vector images for a scene.
///
/// Both images come from the same DOT text. The vector image is
/// post-processed. When the renderer fails, the DOT text is written to
/// `<base>.dot` instead and a [`RenderOutcome::Fallback`] is returned; only a
/// failure to write that file is an error.
pub fn render_outputs(
    scene: &Scene,
    renderer: &dyn Renderer,
    base: &Path,
) -> RenderResult<RenderOutcome> {
    let dot = to_dot(scene);
    let png = output_path(base, ".png");
    let svg = output_path(base, "_vector.svg");

    let rendered = renderer
        .render(&dot, ImageFormat::Png, &png)
        .and_then(|()| renderer.render(&dot, ImageFormat::Svg, &svg));

    match rendered {
        Ok(()) => {
            let viewbox = fix_svg_file(&svg);
            info!(png = %png.display(), svg = %svg.display(), renderer = renderer.name(), "Family tree rendered");
            Ok(RenderOutcome::Rendered { png, svg, viewbox })
        }
        Err(e) => {
            warn!(error = %e, renderer = renderer.name(), "Rendering failed, writing DOT source instead");
            let path = write_dot(&dot, base)?;
            Ok(RenderOutcome::Fallback {
                dot: path,
                reason: e.to_string(),
            })
        }
    }
}

/// Render only the post-processed vector image
pub fn render_vector(
    scene: &Scene,
    renderer: &dyn Renderer,
    output: &Path,
) -> RenderResult<Option<ViewBox>> {
    let dot = to_dot(scene);
    renderer.render(&dot, ImageFormat::Svg, output)?;
    Ok(fix_svg_file(output))
}

/// Write the DOT source next to `base`
pub fn write_dot(dot: &str, base: &Path) -> RenderResult<PathBuf> {
    let path = output_path(base, ".dot");
    std::fs::write(&path, dot).map_err(|source| RenderError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::synthesize;
    use kindred_core::parse_str;
    use std::cell::RefCell;

    const SVG: &str = r#"<svg viewBox="0.00 0.00 10.00 10.00"><g transform="scale(2 2) rotate(0) translate(4 104)"><polygon points="-4,4 -4,-104 96,-104 96,4 -4,4"/></g></svg>"#;

    /// Writes canned output and records each call
    #[derive(Default)]
    struct CannedRenderer {
        calls: RefCell<Vec<(ImageFormat, String)>>,
    }

    impl Renderer for CannedRenderer {
        fn render(&self, dot: &str, format: ImageFormat, output: &Path) -> RenderResult<()> {
            self.calls.borrow_mut().push((format, dot.to_string()));
            let body: &[u8] = match format {
                ImageFormat::Png => b"\x89PNG",
                ImageFormat::Svg => SVG.as_bytes(),
            };
            std::fs::write(output, body)?;
            Ok(())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&self, _dot: &str, _format: ImageFormat, _output: &Path) -> RenderResult<()> {
            Err(RenderError::Failed {
                program: "dot".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "syntax error".to_string(),
            })
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn scene() -> Scene {
        synthesize(&parse_str("1 - A (1950)\n2 - B (1952)\n3 - C\n1 -- 2 (3)"))
    }

    #[test]
    fn test_output_path_keeps_dots() {
        assert_eq!(
            output_path(Path::new("out/tree.v2"), ".png"),
            PathBuf::from("out/tree.v2.png")
        );
        assert_eq!(
            output_path(Path::new("family_tree"), "_vector.svg"),
            PathBuf::from("family_tree_vector.svg")
        );
    }

    #[test]
    fn test_render_outputs_same_dot_for_both_formats() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("family_tree");
        let renderer = CannedRenderer::default();

        let outcome = render_outputs(&scene(), &renderer, &base).expect("render");

        let calls = renderer.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, ImageFormat::Png);
        assert_eq!(calls[1].0, ImageFormat::Svg);
        assert_eq!(calls[0].1, calls[1].1);

        match outcome {
            RenderOutcome::Rendered { png, svg, viewbox } => {
                assert!(png.exists());
                assert_eq!(svg, dir.path().join("family_tree_vector.svg"));
                let viewbox = viewbox.expect("post-processed");
                assert_eq!((viewbox.width, viewbox.height), (100.0, 108.0));
                let content = std::fs::read_to_string(&svg).expect("svg");
                assert!(content.contains(r#"viewBox="0 0 100 108""#));
                assert!(content.contains(r#"transform="translate(4 104)""#));
            }
            other => panic!("expected rendered outcome, got {other:?}"),
        }
        assert!(!dir.path().join("family_tree.dot").exists());
    }

    #[test]
    fn test_render_outputs_falls_back_to_dot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("family_tree");

        let outcome = render_outputs(&scene(), &FailingRenderer, &base).expect("fallback");

        assert!(outcome.is_fallback());
        let dot_path = dir.path().join("family_tree.dot");
        let dot = std::fs::read_to_string(&dot_path).expect("dot file");
        assert_eq!(dot, to_dot(&scene()));
        if let RenderOutcome::Fallback { dot, reason } = outcome {
            assert_eq!(dot, dot_path);
            assert!(reason.contains("syntax error"));
        }
    }

    #[test]
    fn test_render_outputs_fallback_unwritable_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("missing_dir").join("family_tree");

        let err = render_outputs(&scene(), &FailingRenderer, &base).unwrap_err();
        assert!(matches!(err, RenderError::Write { .. }));
    }

    #[test]
    fn test_graphviz_missing_program_is_launch_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let renderer = GraphvizRenderer::new(dir.path().join("no-such-dot"));

        let err = renderer
            .render("digraph {}", ImageFormat::Png, &dir.path().join("x.png"))
            .unwrap_err();
        assert!(matches!(err, RenderError::Launch { .. }));
    }

    #[test]
    fn test_render_vector_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("tree.svg");
        let renderer = CannedRenderer::default();

        let viewbox = render_vector(&scene(), &renderer, &output).expect("render");

        assert!(viewbox.is_some());
        assert_eq!(renderer.calls.borrow().len(), 1);
        assert_eq!(renderer.calls.borrow()[0].0, ImageFormat::Svg);
    }
}
