//! HTML serialization.
//!
//! Output is not pretty-printed: whitespace text nodes are emitted as-is so
//! a parse/serialize round trip keeps the document byte-stable.

use crate::parser::is_void_element;
use crate::{Document, NodeData, NodeId};

struct Context<'doc> {
    doc: &'doc Document,
    buffer: String,
}

impl<'doc> Context<'doc> {
    fn new(doc: &'doc Document) -> Self {
        Self {
            doc,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn get_output(self) -> String {
        self.buffer
    }

    fn node(&mut self, id: NodeId) {
        let Some(node) = self.doc.node(id) else {
            return;
        };
        match &node.data {
            NodeData::Document => self.children(id),
            NodeData::Doctype(body) => {
                self.add("<!");
                self.add(body);
                self.add(">");
            }
            NodeData::Text(text) => self.add(text),
            NodeData::Comment(body) => {
                self.add("<!--");
                self.add(body);
                self.add("-->");
            }
            NodeData::Element(element) => {
                self.add("<");
                self.add(&element.tag);
                for attr in &element.attributes {
                    self.add(" ");
                    self.add(&attr.name);
                    if let Some(value) = &attr.value {
                        self.add("=\"");
                        self.add(&escape_attribute(value));
                        self.add("\"");
                    }
                }
                self.add(">");

                if is_void_element(&element.tag) {
                    return;
                }

                self.children(id);
                self.add("</");
                self.add(&element.tag);
                self.add(">");
            }
        }
    }

    fn children(&mut self, id: NodeId) {
        for child in self.doc.children(id) {
            self.node(*child);
        }
    }
}

fn escape_attribute(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Serialize the whole document, doctype included
pub fn serialize_document(doc: &Document) -> String {
    doc.outer_html(doc.root())
}

impl Document {
    /// Markup of the node itself plus its subtree
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut ctx = Context::new(self);
        ctx.node(id);
        ctx.get_output()
    }

    /// Markup of the node's children
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut ctx = Context::new(self);
        ctx.children(id);
        ctx.get_output()
    }
}
