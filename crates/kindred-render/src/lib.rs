//! Kindred Render - Diagram output for family graphs
//!
//! Turns a [`kindred_core::FamilyGraph`] into a styled [`Scene`], emits it as
//! Graphviz DOT and hands it to a [`Renderer`] for the raster and vector
//! images. The vector image is then post-processed to repair its viewport.

pub mod dot;
pub mod error;
pub mod renderer;
pub mod scene;
pub mod style;
pub mod svg;

pub use dot::to_dot;
pub use error::{RenderError, RenderResult, SvgError};
pub use renderer::{
    output_path, render_outputs, render_vector, write_dot, GraphvizRenderer, ImageFormat,
    RenderOutcome, Renderer,
};
pub use scene::{
    synthesize, synthesize_with, wrap_label, Scene, SceneEdge, SceneNode, SceneOptions,
    MAX_LABEL_WIDTH,
};
pub use svg::{fix_svg_file, fix_viewbox, ViewBox};
