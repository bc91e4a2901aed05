//! Vector post-processor
//!
//! Graphviz scales the SVG content frame by the raster DPI, which leaves the
//! `viewBox` out of step with the drawing. The viewport is rebuilt from the
//! extents of the background polygon.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::SvgError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewBox {
    pub width: f64,
    pub height: f64,
}

impl std::fmt::Display for ViewBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0 0 {} {}", self.width, self.height)
    }
}

fn polygon_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<polygon[^>]*points="([^"]+)""#).expect("valid regex"))
}

fn viewbox_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"viewBox="[^"]*""#).expect("valid regex"))
}

fn transform_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"transform="scale\([^)]+\)\s*rotate\([^)]+\)\s*translate\(([^)]+)\)""#)
            .expect("valid regex")
    })
}

fn parse_points(points: &str) -> Result<Vec<(f64, f64)>, SvgError> {
    let mut parsed = Vec::new();
    for pair in points.split_whitespace() {
        let Some((x, y)) = pair.split_once(',') else {
            continue;
        };
        let x: f64 = x
            .trim()
            .parse()
            .map_err(|_| SvgError::InvalidCoordinate(pair.to_string()))?;
        let y: f64 = y
            .trim()
            .parse()
            .map_err(|_| SvgError::InvalidCoordinate(pair.to_string()))?;
        parsed.push((x, y));
    }
    Ok(parsed)
}

/// Recompute the viewport of an SVG document from its background polygon
pub fn fix_viewbox(content: &str) -> Result<(String, ViewBox), SvgError> {
    let points = polygon_re()
        .captures(content)
        .and_then(|c| c.get(1))
        .ok_or(SvgError::MissingBoundary)?;

    let points = parse_points(points.as_str())?;
    if points.is_empty() {
        return Err(SvgError::NoCoordinates);
    }

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for (x, y) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let viewbox = ViewBox {
        width: max_x - min_x,
        height: max_y - min_y,
    };

    let replacement = format!("viewBox=\"{viewbox}\"");
    let content = viewbox_re().replace_all(content, regex::NoExpand(&replacement));
    let content = transform_re().replace_all(&content, r#"transform="translate(${1})""#);

    Ok((content.into_owned(), viewbox))
}

/// Fix an SVG file in place. Failures are logged and leave the file untouched.
pub fn fix_svg_file(path: &Path) -> Option<ViewBox> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read SVG file");
            return None;
        }
    };

    let (fixed, viewbox) = match fix_viewbox(&content) {
        Ok(result) => result,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "SVG viewBox left unchanged");
            return None;
        }
    };

    if fixed != content {
        if let Err(e) = std::fs::write(path, fixed) {
            warn!(path = %path.display(), error = %e, "Cannot write SVG file");
            return None;
        }
    }

    info!(path = %path.display(), viewbox = %viewbox, "SVG viewBox fixed");
    Some(viewbox)
}
