use crate::model::{Node, Widget};
use crate::tree::Tree;

/// Renders the tree as a tab-indented outline, one node per line:
/// `kind [id] summary`. Ids are left out when `show_ids` is false.
pub fn render(tree: &Tree, show_ids: bool) -> String {
    let mut result = String::new();
    for root in tree.roots() {
        node_to_outline(root, 0, show_ids, &mut result);
    }
    result
}

fn node_to_outline(node: &Node, indent: usize, show_ids: bool, result: &mut String) {
    result.push_str(&"\t".repeat(indent));
    result.push_str(node.kind().as_str());
    if show_ids {
        result.push_str(&format!(" [{}]", node.id));
    }
    let summary = summary(&node.widget);
    if !summary.is_empty() {
        result.push(' ');
        result.push_str(&summary);
    }
    result.push('\n');

    for child in node.children() {
        node_to_outline(child, indent + 1, show_ids, result);
    }
}

fn summary(widget: &Widget) -> String {
    match widget {
        Widget::Container(props) => format!("({}, {} children)", props.direction, props.children.len()),
        Widget::Button(props) => format!("\"{}\" ({})", props.text, props.variant),
        Widget::Input(props) => format!("placeholder=\"{}\"", props.placeholder),
        Widget::Card(props) => format!("\"{}\"", props.content),
        Widget::Label(props) => format!("\"{}\"", props.text),
    }
}
