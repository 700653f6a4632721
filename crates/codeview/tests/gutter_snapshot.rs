use codeview::ui::components::viewer::content_lines;
use insta::assert_snapshot;

fn render_plain(content: &str) -> String {
    content_lines(content, true, 4)
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn gutter_default_renders() {
    let rendered = render_plain("fn main() {\n    println!(\"hi\");\n}");
    assert_snapshot!("gutter_default", rendered);
}
