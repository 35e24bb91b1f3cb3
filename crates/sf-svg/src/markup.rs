//! Serialize a document subtree as XML markup.

use sf_core::{Document, NodeIndex, NodeKind};

/// Markup for `node` and everything below it, two-space indented.
///
/// Attributes come out in the order they were first set, with `id` first.
/// Elements without children or text are self-closing.
pub fn to_markup(doc: &Document, node: NodeIndex) -> String {
    let mut out = String::new();
    write_node(&mut out, doc, node, 0);
    out
}

fn write_node(out: &mut String, doc: &Document, idx: NodeIndex, depth: usize) {
    let Some(node) = doc.node(idx) else {
        return;
    };
    let tag = match &node.kind {
        NodeKind::Document => {
            for child in doc.children(idx) {
                write_node(out, doc, child, depth);
            }
            return;
        }
        NodeKind::Element { tag, .. } => tag,
    };

    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(tag);
    if let Some(id) = &node.id {
        out.push_str(&format!(r#" id="{}""#, escape_xml(id.as_str())));
    }
    for attr in &node.attributes {
        out.push_str(&format!(r#" {}="{}""#, attr.name, escape_xml(&attr.value)));
    }

    let children = doc.children(idx);
    match (&node.text, children.is_empty()) {
        (None, true) => out.push_str("/>\n"),
        (Some(text), true) => {
            out.push('>');
            out.push_str(&escape_xml(text));
            out.push_str(&format!("</{tag}>\n"));
        }
        (text, false) => {
            out.push_str(">\n");
            if let Some(text) = text {
                out.push_str(&indent);
                out.push_str("  ");
                out.push_str(&escape_xml(text));
                out.push('\n');
            }
            for child in children {
                write_node(out, doc, child, depth + 1);
            }
            out.push_str(&format!("{indent}</{tag}>\n"));
        }
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
