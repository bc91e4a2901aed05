//! Graphviz DOT emission

use crate::scene::{Attrs, Scene};

/// Quote a DOT identifier or value. `\n` break markers pass through untouched.
///
/// An odd run of trailing backslashes would escape the closing quote, so it
/// gets one more.
fn quote(value: &str) -> String {
    let mut escaped = value.replace('"', "\\\"");
    let trailing = escaped.chars().rev().take_while(|&c| c == '\\').count();
    if trailing % 2 == 1 {
        escaped.push('\\');
    }
    format!("\"{escaped}\"")
}

fn attr_list(attrs: &Attrs) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!("{}={}", k, quote(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a scene as DOT text
pub fn to_dot(scene: &Scene) -> String {
    let mut output = format!("digraph {} {{\n", quote(&scene.name));
    for (key, value) in &scene.graph_attrs {
        output.push_str(&format!("  {}={};\n", key, quote(value)));
    }
    if !scene.node_defaults.is_empty() {
        output.push_str(&format!("  node [{}];\n", attr_list(&scene.node_defaults)));
    }
    if !scene.edge_defaults.is_empty() {
        output.push_str(&format!("  edge [{}];\n", attr_list(&scene.edge_defaults)));
    }
    output.push('\n');

    for node in &scene.nodes {
        if node.attrs.is_empty() {
            output.push_str(&format!("  {};\n", quote(&node.id)));
        } else {
            output.push_str(&format!("  {} [{}];\n", quote(&node.id), attr_list(&node.attrs)));
        }
    }

    output.push('\n');

    for edge in &scene.edges {
        output.push_str(&format!("  {} -> {}", quote(&edge.from), quote(&edge.to)));
        if edge.attrs.is_empty() {
            output.push_str(";\n");
        } else {
            output.push_str(&format!(" [{}];\n", attr_list(&edge.attrs)));
        }
    }

    output.push_str("}\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{synthesize, SceneEdge, SceneNode};
    use kindred_core::parse_str;

    #[test]
    fn test_quote_escapes_double_quotes_only() {
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote(r"line\nbreak"), r#""line\nbreak""#);
    }

    #[test]
    fn test_quote_closes_after_trailing_backslash() {
        assert_eq!(quote(r"Ivan Petrov \"), r#""Ivan Petrov \\""#);
        assert_eq!(quote(r"even \\"), r#""even \\""#);
    }

    #[test]
    fn test_to_dot_structure() {
        let graph = parse_str("1 - Иван (1950)\n2 - Мария (1952)\n3 - Пётр\n1 -- 2 (3)");
        let dot = to_dot(&synthesize(&graph));

        assert!(dot.starts_with("digraph \"FamilyTree\" {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("  rankdir=\"TB\";\n"));
        assert!(dot.contains("  dpi=\"400\";\n"));
        assert!(dot.contains("node [shape=\"box\", style=\"filled,rounded\""));
        assert!(dot.contains("  \"1\" [label=\"Иван (1950)\", fillcolor=\"#E0E6FF\"];\n"));
        assert!(dot.contains("  \"1\" -> \"union_1\" [dir=\"none\", style=\"bold\"];\n"));
        assert!(dot.contains("  \"union_1\" -> \"3\" [color=\"blue\"];\n"));
    }

    #[test]
    fn test_to_dot_bare_elements() {
        let scene = Scene {
            name: "g".to_string(),
            graph_attrs: Attrs::new(),
            node_defaults: Attrs::new(),
            edge_defaults: Attrs::new(),
            nodes: vec![SceneNode {
                id: "a".to_string(),
                attrs: Attrs::new(),
            }],
            edges: vec![SceneEdge {
                from: "a".to_string(),
                to: "b".to_string(),
                attrs: Attrs::new(),
            }],
        };
        assert_eq!(to_dot(&scene), "digraph \"g\" {\n\n  \"a\";\n\n  \"a\" -> \"b\";\n}\n");
    }
}
