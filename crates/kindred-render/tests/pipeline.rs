use std::path::Path;

use kindred_core::parse_str;
use kindred_render::{
    render_outputs, synthesize, to_dot, ImageFormat, RenderOutcome, RenderResult, Renderer,
};

/// Emits a minimal Graphviz-shaped SVG whose frame is scaled like a 400 DPI render
struct FakeGraphviz;

impl Renderer for FakeGraphviz {
    fn render(&self, dot: &str, format: ImageFormat, output: &Path) -> RenderResult<()> {
        assert!(dot.starts_with("digraph"));
        let body = match format {
            ImageFormat::Png => "PNG".to_string(),
            ImageFormat::Svg => concat!(
                r#"<svg width="2000pt" height="800pt" viewBox="0.00 0.00 480.00 192.00">"#,
                r#"<g id="graph0" class="graph" transform="scale(4.17 4.17) rotate(0) translate(4 188)">"#,
                r#"<polygon fill="white" stroke="none" points="-4,4 -4,-188 476,-188 476,4 -4,4"/>"#,
                "</g></svg>"
            )
            .to_string(),
        };
        std::fs::write(output, body)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "fake-graphviz"
    }
}

const SOURCE: &str = "\
1 - Ivan Petrov (1920-1990)
2 - Maria Petrova (1925)
3 - Oleg Petrov (1950)
4 - Child With A Remarkably Long Name (1980)
1 -- 2 (3, ?)
3 -- ? (4)
";

#[test]
fn test_full_render_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("family_tree");
    let scene = synthesize(&parse_str(SOURCE));

    let outcome = render_outputs(&scene, &FakeGraphviz, &base).unwrap();

    let RenderOutcome::Rendered { png, svg, viewbox } = outcome else {
        panic!("expected a rendered outcome");
    };
    assert_eq!(png, dir.path().join("family_tree.png"));
    assert_eq!(svg, dir.path().join("family_tree_vector.svg"));
    let viewbox = viewbox.unwrap();
    assert_eq!((viewbox.width, viewbox.height), (480.0, 192.0));

    let content = std::fs::read_to_string(&svg).unwrap();
    assert!(content.contains(r#"viewBox="0 0 480 192""#));
    assert!(content.contains(r#"transform="translate(4 188)""#));
}

#[test]
fn test_dot_carries_wrapped_labels_and_placeholders() {
    let dot = to_dot(&synthesize(&parse_str(SOURCE)));

    assert!(dot.contains(r#"label="Child With A Remarkably\nLong Name (1980)""#));
    assert!(dot.contains(r#""unknown_child_1_0" [label="?""#));
    // unknown spouse of 3
    assert!(dot.contains(r##""1000" [label="?", fillcolor="#F0F0F0"]"##));
    assert!(dot.contains(r#""union_2" -> "4" [color="blue"]"#));
}
