//! Graph synthesis
//!
//! Maps a [`FamilyGraph`] into a renderer-agnostic [`Scene`]: styled nodes,
//! styled edges and graph-level defaults. The same scene feeds both the
//! raster and the vector render.

use std::collections::HashSet;

use indexmap::IndexMap;
use kindred_core::{FamilyGraph, Generation, PersonId, Relation, RelationKind};
use serde::{Deserialize, Serialize};

use crate::error::RenderResult;
use crate::style::{self, MarkerStyle};

/// Longest label line before wrapping
pub const MAX_LABEL_WIDTH: usize = 25;

/// Line-break marker understood by the layout program
pub const LINE_BREAK: &str = "\\n";

pub type Attrs = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: String,
    pub attrs: Attrs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEdge {
    pub from: String,
    pub to: String,
    pub attrs: Attrs,
}

/// A complete styled graph description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub graph_attrs: Attrs,
    pub node_defaults: Attrs,
    pub edge_defaults: Attrs,
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
}

impl Scene {
    pub fn to_json_pretty(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn node(&self, id: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a SceneEdge> + 'a {
        self.edges.iter().filter(move |e| e.from == id)
    }
}

/// Knobs for scene synthesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneOptions {
    pub dpi: u32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            dpi: style::DEFAULT_DPI,
        }
    }
}

fn attrs<const N: usize>(pairs: [(&str, &str); N]) -> Attrs {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Greedy word wrap; lines are joined with [`LINE_BREAK`]
pub fn wrap_label(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = current.chars().count() + 1 + word.chars().count();
        if candidate <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join(LINE_BREAK)
}

/// Synthesize a scene with default options
pub fn synthesize(graph: &FamilyGraph) -> Scene {
    synthesize_with(graph, &SceneOptions::default())
}

pub fn synthesize_with(graph: &FamilyGraph, options: &SceneOptions) -> Scene {
    let mut builder = SceneBuilder::new(options);

    for person in graph.people() {
        let label = wrap_label(&person.info, MAX_LABEL_WIDTH);
        let color = style::generation_color(Generation::of(person));
        builder.node(
            person.id.to_string(),
            attrs([("label", label.as_str()), ("fillcolor", color)]),
        );
    }

    let mut unions = 0usize;
    let mut linked: HashSet<(PersonId, PersonId)> = HashSet::new();

    for relation in graph.relations() {
        if let Relation::ParentChild { parent, child } = relation {
            // (a, b) and (b, a) draw the same line
            if linked.contains(&(*parent, *child)) || linked.contains(&(*child, *parent)) {
                continue;
            }
            linked.insert((*parent, *child));
            builder.edge(
                parent.to_string(),
                child.to_string(),
                attrs([
                    ("color", style::DASHED_EDGE_COLOR),
                    ("style", "dashed"),
                    ("dir", "none"),
                ]),
            );
            continue;
        }

        let (Some(couple), Some(marker)) = (relation.couple(), style::marker_style(relation.kind()))
        else {
            continue;
        };
        unions += 1;
        let union = format!("union_{unions}");
        builder.union_node(&union, marker);
        for partner in [couple.first, couple.second] {
            builder.edge(
                partner.to_string(),
                union.clone(),
                attrs([("dir", "none"), ("style", "bold")]),
            );
        }

        for child in relation.known_children() {
            builder.edge(
                union.clone(),
                child.to_string(),
                attrs([("color", style::CHILD_EDGE_COLOR)]),
            );
        }

        match relation.kind() {
            RelationKind::MixedChildren => {
                for i in 0..relation.unknown_children() {
                    builder.unknown_child(&union, format!("unknown_child_{unions}_{i}"));
                }
            }
            RelationKind::UnknownChildren => {
                builder.unknown_child(&union, format!("unknown_children_{unions}"));
            }
            _ => {}
        }
    }

    builder.finish()
}

struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    fn new(options: &SceneOptions) -> Self {
        let dpi = options.dpi.to_string();
        Self {
            scene: Scene {
                name: "FamilyTree".to_string(),
                graph_attrs: attrs([
                    ("rankdir", "TB"),
                    ("bgcolor", "white"),
                    ("size", "20,30!"),
                    ("dpi", dpi.as_str()),
                    ("resolution", dpi.as_str()),
                ]),
                node_defaults: attrs([
                    ("shape", "box"),
                    ("style", "filled,rounded"),
                    ("fontname", style::FONT),
                    ("fontsize", "12"),
                ]),
                edge_defaults: attrs([("fontname", style::FONT), ("fontsize", "10")]),
                nodes: Vec::new(),
                edges: Vec::new(),
            },
        }
    }

    fn node(&mut self, id: String, attrs: Attrs) {
        self.scene.nodes.push(SceneNode { id, attrs });
    }

    fn edge(&mut self, from: String, to: String, attrs: Attrs) {
        self.scene.edges.push(SceneEdge { from, to, attrs });
    }

    fn union_node(&mut self, id: &str, marker: MarkerStyle) {
        self.node(
            id.to_string(),
            attrs([
                ("label", style::UNION_LABEL),
                ("shape", "circle"),
                ("style", "filled"),
                ("fillcolor", marker.fill),
                ("width", marker.size),
                ("height", marker.size),
                ("fontsize", marker.font_size),
            ]),
        );
    }

    fn unknown_child(&mut self, union: &str, id: String) {
        self.node(
            id.clone(),
            attrs([
                ("label", "?"),
                ("shape", "box"),
                ("style", "filled,dashed"),
                ("fillcolor", style::PLACEHOLDER_FILL),
                ("fontsize", "10"),
            ]),
        );
        self.edge(
            union.to_string(),
            id,
            attrs([("color", style::DASHED_EDGE_COLOR), ("style", "dashed")]),
        );
    }

    fn finish(self) -> Scene {
        self.scene
    }
}
