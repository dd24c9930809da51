//! HTML serialization for [`Dom`] trees.
//!
//! Text nodes can be overridden per node id. Rendered articles keep their
//! pristine text in the tree and pass transliterated text as overrides, so
//! the tree itself never drifts from the source.

use std::collections::HashMap;
use std::fmt::Write;

use super::{Dom, NodeData, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Serialize a node and its subtree.
pub fn serialize_node(dom: &Dom, id: NodeId, overrides: &HashMap<NodeId, String>) -> String {
    let mut out = String::new();
    write_node(dom, id, overrides, false, &mut out);
    out
}

/// Serialize only the children of a node.
pub fn serialize_children(dom: &Dom, id: NodeId, overrides: &HashMap<NodeId, String>) -> String {
    let mut out = String::new();
    for child in dom.children(id) {
        write_node(dom, child, overrides, false, &mut out);
    }
    out
}

fn write_node(
    dom: &Dom,
    id: NodeId,
    overrides: &HashMap<NodeId, String>,
    raw_text: bool,
    out: &mut String,
) {
    let Some(node) = dom.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for child in dom.children(id) {
                write_node(dom, child, overrides, false, out);
            }
        }
        NodeData::Doctype(name) => {
            write!(out, "<!DOCTYPE {name}>").unwrap();
        }
        NodeData::Comment(text) => {
            write!(out, "<!--{text}-->").unwrap();
        }
        NodeData::Text(text) => {
            let text = overrides.get(&id).map(String::as_str).unwrap_or(text);
            if raw_text {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.as_ref();
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                write!(out, " {}=\"{}\"", attr.local_name(), escape_attr(&attr.value)).unwrap();
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            let raw = RAW_TEXT_ELEMENTS.contains(&tag);
            for child in dom.children(id) {
                write_node(dom, child, overrides, raw, out);
            }
            write!(out, "</{tag}>").unwrap();
        }
    }
}

/// Escape text content.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '\u{00A0}' => result.push_str("&nbsp;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape an attribute value for use inside double quotes.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Attribute, parse_html};

    #[test]
    fn test_round_trip_fragment() {
        let dom = parse_html(r#"<p class="x">a &amp; b<br>c</p>"#);
        let body = dom.find_by_tag("body").unwrap();
        assert_eq!(
            serialize_children(&dom, body, &HashMap::new()),
            r#"<p class="x">a &amp; b<br>c</p>"#
        );
    }

    #[test]
    fn test_overrides_replace_text() {
        let mut dom = Dom::new();
        let p = dom.create_html_element("p", vec![Attribute::new("title", "\"q\"")]);
        dom.append(dom.document(), p);
        let text = dom.create_text("राम");
        dom.append(p, text);

        let overrides = HashMap::from([(text, "rāma".to_string())]);
        assert_eq!(
            serialize_node(&dom, p, &overrides),
            "<p title=\"&quot;q&quot;\">rāma</p>"
        );
        assert_eq!(serialize_node(&dom, p, &HashMap::new()), "<p title=\"&quot;q&quot;\">राम</p>");
    }

    #[test]
    fn test_style_content_is_raw() {
        let mut dom = Dom::new();
        let style = dom.create_html_element("style", vec![]);
        dom.append(dom.document(), style);
        dom.append_text(style, "a > b {}");
        assert_eq!(serialize_node(&dom, style, &HashMap::new()), "<style>a > b {}</style>");
    }
}
