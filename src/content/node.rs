//! Typed content nodes.
//!
//! Block payloads are parsed once into [`ContentNode`] trees. Interactive
//! markers embedded as `data-*` attributes become their own variants here, so
//! the renderer dispatches on the variant instead of sniffing attributes.

use crate::dom::{self, Dom, NodeData, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    Text(String),
    Element(ElementNode),
    Footnote(Note),
    SpecialNote(Note),
    Citation(CitationRef),
}

/// An ordinary HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<ContentNode>,
}

impl ElementNode {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Text of the element, without note and citation markers.
    pub fn text(&self) -> String {
        let mut out = String::new();
        push_text(&self.children, &mut out);
        out
    }

    fn add_class(&mut self, class: &str) {
        match self.attrs.iter_mut().find(|(n, _)| n == "class") {
            Some((_, value)) if value.split_whitespace().any(|c| c == class) => {}
            Some((_, value)) if value.trim().is_empty() => *value = class.to_string(),
            Some((_, value)) => {
                value.push(' ');
                value.push_str(class);
            }
            None => self.attrs.push(("class".to_string(), class.to_string())),
        }
    }
}

fn push_text(nodes: &[ContentNode], out: &mut String) {
    for node in nodes {
        match node {
            ContentNode::Text(text) => out.push_str(text),
            ContentNode::Element(element) => push_text(&element.children, out),
            _ => {}
        }
    }
}

/// Footnote or special note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub content: String,
}

/// Inline reference to a citation, resolved lazily by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationRef {
    pub reference: String,
    pub label: String,
}

impl ContentNode {
    /// Footnotes, special notes and citations render as interactive controls.
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            ContentNode::Footnote(_) | ContentNode::SpecialNote(_) | ContentNode::Citation(_)
        )
    }

    /// True if this node or anything beneath it is interactive.
    pub fn contains_interactive(&self) -> bool {
        match self {
            ContentNode::Element(element) => {
                element.children.iter().any(ContentNode::contains_interactive)
            }
            other => other.is_interactive(),
        }
    }
}

/// Parse a block payload into typed nodes.
pub fn parse_content(html: &str) -> Vec<ContentNode> {
    let dom = dom::parse_html(html);
    let Some(body) = dom.find_by_tag("body") else {
        return Vec::new();
    };
    convert_children(&dom, body)
}

fn convert_children(dom: &Dom, parent: NodeId) -> Vec<ContentNode> {
    dom.children(parent)
        .filter_map(|child| convert(dom, child))
        .collect()
}

fn convert(dom: &Dom, id: NodeId) -> Option<ContentNode> {
    let node = dom.get(id)?;
    match &node.data {
        NodeData::Text(text) => Some(ContentNode::Text(text.clone())),
        NodeData::Element { name, attrs, .. } => {
            if let Some(marker) = classify_marker(dom, id) {
                return Some(marker);
            }

            let mut element = ElementNode {
                tag: name.local.to_string(),
                attrs: attrs
                    .iter()
                    .map(|a| (a.local_name().to_string(), a.value.clone()))
                    .collect(),
                children: convert_children(dom, id),
            };

            // A paragraph cannot hold the block-level markup interactive
            // controls render to.
            if element.tag == "p" && element.children.iter().any(ContentNode::contains_interactive) {
                element.tag = "div".to_string();
                element.add_class("paragraph");
            }

            Some(ContentNode::Element(element))
        }
        NodeData::Document | NodeData::Comment(_) | NodeData::Doctype(_) => None,
    }
}

fn classify_marker(dom: &Dom, id: NodeId) -> Option<ContentNode> {
    let data_type = dom.get_attr(id, "data-type").unwrap_or_default();

    if data_type.eq_ignore_ascii_case("footnote") {
        return Some(ContentNode::Footnote(note(dom, id)));
    }
    if data_type.eq_ignore_ascii_case("specialnote") {
        return Some(ContentNode::SpecialNote(note(dom, id)));
    }

    let is_citation = dom.has_attr(id, "data-citation-node")
        || dom
            .get_attr(id, "data-citation")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));
    if is_citation {
        let reference = ["data-citation-id", "data-ref", "data-id"]
            .iter()
            .find_map(|name| dom.get_attr(id, name))
            .unwrap_or_default()
            .to_string();
        return Some(ContentNode::Citation(CitationRef {
            reference,
            label: dom.text_content(id).trim().to_string(),
        }));
    }

    None
}

fn note(dom: &Dom, id: NodeId) -> Note {
    let content = match dom.get_attr(id, "data-content") {
        Some(content) => content.to_string(),
        None => dom.text_content(id).trim().to_string(),
    };
    Note { content }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paragraph() {
        let nodes = parse_content("<p>अथ योगानुशासनम्</p>");
        assert_eq!(
            nodes,
            vec![ContentNode::Element(ElementNode {
                tag: "p".to_string(),
                attrs: vec![],
                children: vec![ContentNode::Text("अथ योगानुशासनम्".to_string())],
            })]
        );
    }

    #[test]
    fn test_footnote_marker() {
        let nodes = parse_content(r#"धर्म<span data-type="footnote" data-content="On dharma.">*</span>"#);
        assert_eq!(nodes.len(), 2);
        assert_eq!(
            nodes[1],
            ContentNode::Footnote(Note {
                content: "On dharma.".to_string()
            })
        );
    }

    #[test]
    fn test_special_note_falls_back_to_text() {
        let nodes = parse_content(r#"<span data-type="specialnote"> see above </span>"#);
        assert_eq!(
            nodes[0],
            ContentNode::SpecialNote(Note {
                content: "see above".to_string()
            })
        );
    }

    #[test]
    fn test_citation_markers() {
        let nodes = parse_content(
            r#"<span data-citation-node data-citation-id="ys-1.2">YS 1.2</span><span data-citation="true" data-ref="bg-2.47">BG</span>"#,
        );
        assert_eq!(
            nodes,
            vec![
                ContentNode::Citation(CitationRef {
                    reference: "ys-1.2".to_string(),
                    label: "YS 1.2".to_string()
                }),
                ContentNode::Citation(CitationRef {
                    reference: "bg-2.47".to_string(),
                    label: "BG".to_string()
                }),
            ]
        );
    }

    #[test]
    fn test_paragraph_with_marker_becomes_container() {
        let nodes = parse_content(
            r#"<p class="lead">text<em><span data-type="footnote" data-content="n">1</span></em></p>"#,
        );
        let ContentNode::Element(element) = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(element.tag, "div");
        assert_eq!(element.attr("class"), Some("lead paragraph"));
    }

    #[test]
    fn test_paragraph_without_marker_is_kept() {
        let nodes = parse_content("<p><b>bold</b></p>");
        let ContentNode::Element(element) = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(element.tag, "p");
        assert!(!nodes[0].contains_interactive());
    }

    #[test]
    fn test_element_text_skips_markers() {
        let nodes = parse_content(
            r#"<h2>योगः<span data-type="footnote" data-content="n">*</span> <em>सूत्रम्</em><span data-citation-node data-citation-id="ys-1.1">YS</span></h2>"#,
        );
        let ContentNode::Element(element) = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(element.text(), "योगः सूत्रम्");
    }
}
