//! Transliteration of marked regions in a rendered tree.
//!
//! A region is any element with class `font-devanagari` or a
//! `data-transliterate` attribute. Text inside interactive controls (links,
//! buttons, tooltips, citation cards, footnote markers) keeps its original
//! script. The tree is only read: converted text comes back as a per-node
//! override map, always computed from the stored original.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use crate::context::TransliterationContext;
use crate::dom::{Dom, NodeId};
use crate::prefs::PreferenceStore;
use crate::script::Script;

const CONTROL_TAGS: &[&str] = &["a", "button"];
const CONTROL_CLASSES: &[&str] = &["tooltip", "citation-node", "footnote-ref"];

/// True if `id` opens a transliteration region.
pub fn is_region(dom: &Dom, id: NodeId) -> bool {
    dom.has_class(id, "font-devanagari") || dom.has_attr(id, "data-transliterate")
}

fn is_control(dom: &Dom, id: NodeId) -> bool {
    dom.element_name(id)
        .is_some_and(|name| CONTROL_TAGS.contains(&&**name))
        || CONTROL_CLASSES.iter().any(|class| dom.has_class(id, class))
        || dom.get_attr(id, "role") == Some("tooltip")
        || dom.has_attr(id, "data-citation-node")
}

/// Text nodes under `root` that should follow the selected script, in
/// document order. Each node appears once even when regions nest.
pub fn region_text_nodes(dom: &Dom, root: NodeId) -> Vec<NodeId> {
    let mut regions = Vec::new();
    if is_region(dom, root) {
        regions.push(root);
    }
    regions.extend(
        dom.descendants(root)
            .into_iter()
            .filter(|&id| is_region(dom, id)),
    );

    let mut visited = HashSet::new();
    let mut nodes = Vec::new();
    for region in regions {
        for id in dom.descendants(region) {
            if !dom.is_text(id) || !visited.insert(id) {
                continue;
            }
            if dom.ancestors(id).any(|ancestor| is_control(dom, ancestor)) {
                continue;
            }
            nodes.push(id);
        }
    }
    nodes
}

/// Converted text for every region text node that changes under the
/// context's current script. Empty while the context shows Devanagari.
pub fn transliteration_overrides<S: PreferenceStore>(
    dom: &Dom,
    root: NodeId,
    ctx: &TransliterationContext<S>,
) -> HashMap<NodeId, String> {
    if ctx.effective_script() == Script::SOURCE {
        return HashMap::new();
    }

    region_text_nodes(dom, root)
        .into_iter()
        .filter_map(|id| {
            let original = dom.text(id)?;
            match ctx.transliterate_text(original) {
                Cow::Owned(converted) if converted != original => Some((id, converted)),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_html, serialize_node};
    use crate::prefs::MemoryStore;

    fn context(script: &str) -> TransliterationContext {
        let mut ctx = TransliterationContext::new(MemoryStore::new());
        ctx.hydrate();
        ctx.set_target_script(script);
        ctx
    }

    #[test]
    fn test_only_marked_regions() {
        let dom = parse_html(r#"<div><p>राम</p><p class="font-devanagari">सीता</p></div>"#);
        let body = dom.find_by_tag("body").unwrap();
        let nodes = region_text_nodes(&dom, body);
        assert_eq!(nodes.len(), 1);
        assert_eq!(dom.text(nodes[0]), Some("सीता"));
    }

    #[test]
    fn test_controls_are_skipped() {
        let dom = parse_html(
            r#"<div data-transliterate>
                <a href="x">राम</a>
                <button>राम</button>
                <span role="tooltip">राम</span>
                <span class="citation-node"><b>राम</b></span>
                <sup class="footnote-ref">राम</sup>
                <em>सीता</em>
            </div>"#,
        );
        let body = dom.find_by_tag("body").unwrap();
        let texts: Vec<_> = region_text_nodes(&dom, body)
            .into_iter()
            .filter_map(|id| dom.text(id))
            .filter(|t| !t.trim().is_empty())
            .collect();
        assert_eq!(texts, ["सीता"]);
    }

    #[test]
    fn test_nested_regions_visit_once() {
        let dom = parse_html(
            r#"<div class="font-devanagari"><span data-transliterate>नमः</span></div>"#,
        );
        let body = dom.find_by_tag("body").unwrap();
        assert_eq!(region_text_nodes(&dom, body).len(), 1);
    }

    #[test]
    fn test_overrides_leave_tree_untouched() {
        let dom = parse_html(r#"<p class="font-devanagari">नमस्ते</p>"#);
        let p = dom.find_by_tag("p").unwrap();

        let ctx = context("IAST");
        let overrides = transliteration_overrides(&dom, p, &ctx);
        assert_eq!(
            serialize_node(&dom, p, &overrides),
            r#"<p class="font-devanagari">namaste</p>"#
        );
        assert_eq!(dom.text_content(p), "नमस्ते");
    }

    #[test]
    fn test_no_overrides_for_devanagari() {
        let dom = parse_html(r#"<p class="font-devanagari">नमस्ते</p>"#);
        let p = dom.find_by_tag("p").unwrap();
        assert!(transliteration_overrides(&dom, p, &context("DEVANAGARI")).is_empty());
    }
}
