//! Color and shape constants for the diagram

use kindred_core::{Generation, RelationKind};

/// Fill color of a person node by generation bucket
pub fn generation_color(generation: Generation) -> &'static str {
    match generation {
        Generation::Before1921 => "#FFE4E1",
        Generation::From1921To1940 => "#E6E6FA",
        Generation::From1941To1960 => "#E0E6FF",
        Generation::From1961To1980 => "#E6FFE6",
        Generation::From1981To2000 => "#FFFACD",
        Generation::After2000 => "#FFE4E6",
        Generation::UnknownSpouse => "#F0F0F0",
    }
}

/// Union marker appearance per marriage variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub fill: &'static str,
    pub size: &'static str,
    pub font_size: &'static str,
}

pub fn marker_style(kind: RelationKind) -> Option<MarkerStyle> {
    let (fill, size, font_size) = match kind {
        RelationKind::Married => ("#FFB6C1", "0.5", "16"),
        RelationKind::MixedChildren => ("#FFA07A", "0.5", "16"),
        RelationKind::Childless => ("#E6E6FA", "0.4", "14"),
        RelationKind::UnknownChildren => ("#FFFACD", "0.5", "12"),
        RelationKind::ParentChild => return None,
    };
    Some(MarkerStyle {
        fill,
        size,
        font_size,
    })
}

pub const UNION_LABEL: &str = "♥";
pub const CHILD_EDGE_COLOR: &str = "blue";
pub const PLACEHOLDER_FILL: &str = "#F0F0F0";
pub const DASHED_EDGE_COLOR: &str = "gray";
pub const FONT: &str = "Arial";
pub const DEFAULT_DPI: u32 = 400;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generation_colors_are_distinct() {
        let colors: HashSet<_> = Generation::ALL.iter().map(|&g| generation_color(g)).collect();
        assert_eq!(colors.len(), Generation::ALL.len());
    }

    #[test]
    fn test_marker_colors_are_distinct() {
        let fills: HashSet<_> = RelationKind::ALL
            .iter()
            .filter_map(|&k| marker_style(k))
            .map(|s| s.fill)
            .collect();
        assert_eq!(fills.len(), 4);
        assert!(marker_style(RelationKind::ParentChild).is_none());
    }
}
