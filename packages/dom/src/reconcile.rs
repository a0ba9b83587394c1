//! In-place fragment patching.
//!
//! [`Document::patch_inner_html`] parses markup into a scratch tree and
//! merges it into the live children instead of replacing them. A live node
//! of the same kind (same tag, for elements) is kept and updated, so its id
//! survives the edit. Only nodes with no counterpart are created or detached.

use crate::{Document, DomError, DomResult, HtmlParser, NodeData, NodeId};

impl Document {
    /// Make the children of `id` match `html`, keeping every reusable node
    pub fn patch_inner_html(&mut self, id: NodeId, html: &str) -> DomResult<()> {
        if self.node(id).is_none() {
            return Err(DomError::NodeNotFound(id));
        }

        let mut scratch = Document::new();
        let scratch_root = scratch.root();
        HtmlParser::new(html).parse_into(&mut scratch, scratch_root)?;

        let before = self.len();
        self.reconcile_children(id, &scratch, scratch_root)?;
        tracing::trace!(node = %id, allocated = self.len() - before, "patched inner html");
        Ok(())
    }

    fn reconcile_children(
        &mut self,
        target: NodeId,
        source: &Document,
        source_parent: NodeId,
    ) -> DomResult<()> {
        let old = self.children(target).to_vec();
        let mut cursor = 0;
        let mut merged = Vec::with_capacity(source.children(source_parent).len());

        for &incoming in source.children(source_parent) {
            let matched = match &source.node(incoming).map(|n| &n.data) {
                // Elements may be found further ahead, past inserted or deleted text
                Some(NodeData::Element(_)) => old[cursor..]
                    .iter()
                    .position(|&o| same_kind(self, o, source, incoming))
                    .map(|offset| cursor + offset),
                // Text and comments only pair up in place
                _ => old
                    .get(cursor)
                    .filter(|&&o| same_kind(self, o, source, incoming))
                    .map(|_| cursor),
            };

            let node = match matched {
                Some(index) => {
                    cursor = index + 1;
                    self.update_node(old[index], source, incoming)?;
                    old[index]
                }
                None => self.import_subtree(source, incoming)?,
            };
            merged.push(node);
        }

        self.clear_children(target);
        for node in merged {
            self.append_child(target, node)?;
        }
        Ok(())
    }

    fn update_node(&mut self, id: NodeId, source: &Document, incoming: NodeId) -> DomResult<()> {
        let data = source
            .node(incoming)
            .map(|n| n.data.clone())
            .ok_or(DomError::NodeNotFound(incoming))?;

        match data {
            NodeData::Element(element) => {
                if let Some(existing) = self.element_mut(id) {
                    if existing.attributes != element.attributes {
                        existing.attributes = element.attributes;
                    }
                }
                self.reconcile_children(id, source, incoming)
            }
            other => {
                if let Some(node) = self.node_mut(id) {
                    if node.data != other {
                        node.data = other;
                    }
                }
                Ok(())
            }
        }
    }

    /// Copy a scratch subtree into this arena
    fn import_subtree(&mut self, source: &Document, incoming: NodeId) -> DomResult<NodeId> {
        let data = source
            .node(incoming)
            .map(|n| n.data.clone())
            .ok_or(DomError::NodeNotFound(incoming))?;

        let id = match data {
            NodeData::Element(element) => {
                let id = self.create_element(element.tag);
                if let Some(created) = self.element_mut(id) {
                    created.attributes = element.attributes;
                }
                id
            }
            NodeData::Text(text) => self.create_text(text),
            NodeData::Comment(text) => self.create_comment(text),
            NodeData::Doctype(body) => self.create_doctype(body),
            NodeData::Document => return Err(DomError::NotAnElement(incoming)),
        };

        for &child in source.children(incoming) {
            let imported = self.import_subtree(source, child)?;
            self.append_child(id, imported)?;
        }
        Ok(id)
    }
}

fn same_kind(doc: &Document, old: NodeId, source: &Document, incoming: NodeId) -> bool {
    let (Some(a), Some(b)) = (doc.node(old), source.node(incoming)) else {
        return false;
    };
    match (&a.data, &b.data) {
        (NodeData::Element(x), NodeData::Element(y)) => x.tag == y.tag,
        (NodeData::Text(_), NodeData::Text(_))
        | (NodeData::Comment(_), NodeData::Comment(_))
        | (NodeData::Doctype(_), NodeData::Doctype(_)) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_html;

    #[test]
    fn test_nested_element_keeps_its_id() {
        let mut doc = parse_html(r#"<p>Look <img src="a.jpg" class="editable"></p>"#).unwrap();
        let p = doc.find_by_tag(doc.root(), "p").unwrap();
        let img = doc.find_by_tag(p, "img").unwrap();

        doc.patch_inner_html(p, r#"Look! <img src="a.jpg" class="editable">"#)
            .unwrap();

        assert_eq!(doc.find_by_tag(p, "img"), Some(img));
        assert!(doc.is_attached(img));
        assert_eq!(doc.inner_html(p), r#"Look! <img src="a.jpg" class="editable">"#);
    }

    #[test]
    fn test_text_inserted_before_element() {
        let mut doc = parse_html(r#"<p><img src="a.jpg"> tail</p>"#).unwrap();
        let p = doc.find_by_tag(doc.root(), "p").unwrap();
        let img = doc.find_by_tag(p, "img").unwrap();

        doc.patch_inner_html(p, r#"head <img src="a.jpg"> tail"#).unwrap();

        assert_eq!(doc.find_by_tag(p, "img"), Some(img));
        assert_eq!(doc.inner_html(p), r#"head <img src="a.jpg"> tail"#);
    }

    #[test]
    fn test_attributes_and_nested_text_follow_markup() {
        let mut doc = parse_html(r#"<div><b class="x">bold</b><i>gone</i></div>"#).unwrap();
        let div = doc.find_by_tag(doc.root(), "div").unwrap();
        let b = doc.find_by_tag(div, "b").unwrap();
        let i = doc.find_by_tag(div, "i").unwrap();

        doc.patch_inner_html(div, r#"<b id="y">bolder</b><em>new</em>"#).unwrap();

        assert_eq!(doc.find_by_tag(div, "b"), Some(b));
        assert_eq!(doc.get_attribute(b, "id"), Some("y"));
        assert!(!doc.has_attribute(b, "class"));
        assert!(!doc.is_attached(i));
        assert_eq!(doc.inner_html(div), r#"<b id="y">bolder</b><em>new</em>"#);
    }

    #[test]
    fn test_repeated_edits_do_not_grow_arena() {
        let mut doc = parse_html(r#"<p>a <img src="a.jpg"> b</p>"#).unwrap();
        let p = doc.find_by_tag(doc.root(), "p").unwrap();
        let before = doc.len();

        for i in 0..100 {
            doc.patch_inner_html(p, &format!(r#"a{i} <img src="a.jpg"> b"#)).unwrap();
        }

        assert_eq!(doc.len(), before);
    }

    #[test]
    fn test_patch_unknown_node() {
        let mut doc = parse_html("<p>x</p>").unwrap();
        assert!(doc.patch_inner_html(crate::NodeId(999), "y").is_err());
    }
}
