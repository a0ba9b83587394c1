//! # HTML Parser
//!
//! Lenient tree builder over the [`Token`] stream:
//!
//! - void elements never take children
//! - raw-text elements (`script`, `style`, `textarea`, `title`) keep their
//!   body verbatim up to the matching close tag
//! - close tags pop back to the nearest open element with the same name;
//!   unmatched close tags are dropped
//! - elements still open at EOF are closed implicitly

use crate::tokenizer::{AttrToken, Token};
use crate::{Attribute, Document, DomError, DomResult, NodeData, NodeId};
use logos::{Lexer, Logos};

pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

pub fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

/// Parse a complete HTML document
pub fn parse_html(source: &str) -> DomResult<Document> {
    let mut doc = Document::new();
    let root = doc.root();
    HtmlParser::new(source).parse_into(&mut doc, root)?;
    Ok(doc)
}

pub struct HtmlParser<'src> {
    lexer: Lexer<'src, Token<'src>>,
}

impl<'src> HtmlParser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Token::lexer(source),
        }
    }

    /// Parse the source as children of `parent`, returning the new top-level nodes
    pub fn parse_into(mut self, doc: &mut Document, parent: NodeId) -> DomResult<Vec<NodeId>> {
        let mut stack = vec![parent];
        let mut top_level = Vec::new();

        while let Some(result) = self.lexer.next() {
            let token = result.map_err(|_| DomError::lexer_error(self.lexer.span().start))?;
            let current = *stack.last().unwrap_or(&parent);

            match token {
                Token::Doctype(body) => {
                    let node = doc.create_doctype(body);
                    Self::attach(doc, current, node, parent, &mut top_level)?;
                }
                Token::Comment(body) => {
                    let node = doc.create_comment(body);
                    Self::attach(doc, current, node, parent, &mut top_level)?;
                }
                Token::Text(text) => {
                    Self::append_text(doc, current, text, parent, &mut top_level)?;
                }
                Token::LessThan => {
                    Self::append_text(doc, current, "<", parent, &mut top_level)?;
                }
                Token::OpenTag(source) => {
                    let (tag, attributes, self_closing) = parse_open_tag(source);
                    let node = doc.create_element(tag.as_str());
                    if let Some(element) = doc.element_mut(node) {
                        element.attributes = attributes;
                    }
                    Self::attach(doc, current, node, parent, &mut top_level)?;

                    if self_closing || is_void_element(&tag) {
                        continue;
                    }
                    if is_raw_text_element(&tag) {
                        let body = self.take_raw_text(&tag);
                        if !body.is_empty() {
                            let text = doc.create_text(body);
                            doc.append_child(node, text)?;
                        }
                        // The close tag that follows is consumed as unmatched
                        continue;
                    }
                    stack.push(node);
                }
                Token::CloseTag(name) => {
                    let name = name.to_ascii_lowercase();
                    // Never pop the fragment parent itself
                    if let Some(pos) = stack
                        .iter()
                        .skip(1)
                        .rposition(|id| doc.tag_name(*id) == Some(name.as_str()))
                    {
                        stack.truncate(pos + 1);
                    }
                }
            }
        }

        Ok(top_level)
    }

    fn attach(
        doc: &mut Document,
        current: NodeId,
        node: NodeId,
        parent: NodeId,
        top_level: &mut Vec<NodeId>,
    ) -> DomResult<()> {
        doc.append_child(current, node)?;
        if current == parent {
            top_level.push(node);
        }
        Ok(())
    }

    /// Append text, merging with a preceding text sibling
    fn append_text(
        doc: &mut Document,
        current: NodeId,
        text: &str,
        parent: NodeId,
        top_level: &mut Vec<NodeId>,
    ) -> DomResult<()> {
        if let Some(last) = doc.children(current).last().copied() {
            if let Some(node) = doc.node_mut(last) {
                if let NodeData::Text(existing) = &mut node.data {
                    existing.push_str(text);
                    return Ok(());
                }
            }
        }
        let node = doc.create_text(text);
        Self::attach(doc, current, node, parent, top_level)
    }

    fn take_raw_text(&mut self, tag: &str) -> &'src str {
        let rest = self.lexer.remainder();
        let needle = format!("</{}", tag);
        // ASCII lowercasing keeps byte offsets intact
        let end = rest
            .to_ascii_lowercase()
            .find(&needle)
            .unwrap_or(rest.len());
        self.lexer.bump(end);
        &rest[..end]
    }
}

/// Split `<tag a="1" b>` into name, attributes, and self-closing flag
pub fn parse_open_tag(source: &str) -> (String, Vec<Attribute>, bool) {
    let inner = source
        .strip_prefix('<')
        .unwrap_or(source)
        .strip_suffix('>')
        .unwrap_or(source);
    let trimmed = inner.trim_end();
    let (inner, self_closing) = match trimmed.strip_suffix('/') {
        Some(rest) => (rest, true),
        None => (inner, false),
    };

    let name_end = inner
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(inner.len());
    let tag = inner[..name_end].to_ascii_lowercase();
    let attributes = parse_attributes(&inner[name_end..]);

    (tag, attributes, self_closing)
}

fn parse_attributes(source: &str) -> Vec<Attribute> {
    let tokens: Vec<AttrToken> = AttrToken::lexer(source).filter_map(Result::ok).collect();
    let mut attributes: Vec<Attribute> = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let AttrToken::Word(name) = &tokens[i] else {
            i += 1;
            continue;
        };
        let name = name.to_ascii_lowercase();
        i += 1;

        let value = if matches!(tokens.get(i), Some(AttrToken::Equals)) {
            i += 1;
            match tokens.get(i) {
                Some(AttrToken::DoubleQuoted(v))
                | Some(AttrToken::SingleQuoted(v))
                | Some(AttrToken::Word(v)) => {
                    i += 1;
                    Some(v.to_string())
                }
                _ => Some(String::new()),
            }
        } else {
            None
        };

        // First occurrence wins, as in browsers
        if !attributes.iter().any(|a| a.name == name) {
            attributes.push(Attribute { name, value });
        }
    }

    attributes
}

impl Document {
    /// Replace the children of `id` with the parsed fragment
    pub fn set_inner_html(&mut self, id: NodeId, html: &str) -> DomResult<()> {
        if self.node(id).is_none() {
            return Err(DomError::NodeNotFound(id));
        }
        self.clear_children(id);
        HtmlParser::new(html).parse_into(self, id)?;
        Ok(())
    }

    /// Parse a fragment as new trailing children of `parent`
    pub fn append_html(&mut self, parent: NodeId, html: &str) -> DomResult<Vec<NodeId>> {
        if self.node(parent).is_none() {
            return Err(DomError::NodeNotFound(parent));
        }
        HtmlParser::new(html).parse_into(self, parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_open_tag() {
        let (tag, attrs, self_closing) = parse_open_tag(r#"<IMG SRC="a.jpg" alt='x' hidden />"#);
        assert_eq!(tag, "img");
        assert!(self_closing);
        assert_eq!(
            attrs,
            vec![
                Attribute::new("src", "a.jpg"),
                Attribute::new("alt", "x"),
                Attribute::bare("hidden"),
            ]
        );
    }

    #[test]
    fn test_duplicate_attribute_keeps_first() {
        let (_, attrs, _) = parse_open_tag(r#"<p id="a" id="b">"#);
        assert_eq!(attrs, vec![Attribute::new("id", "a")]);
    }

    #[test]
    fn test_void_elements_take_no_children() {
        let doc = parse_html("<div><img src=a.jpg><p>after</p></div>").unwrap();
        let div = doc.find_by_tag(doc.root(), "div").unwrap();
        let tags: Vec<_> = doc
            .children(div)
            .iter()
            .filter_map(|c| doc.tag_name(*c))
            .collect();
        assert_eq!(tags, vec!["img", "p"]);
    }

    #[test]
    fn test_raw_text_script() {
        let doc = parse_html("<script>if (a < b && c > d) {}</script><p>x</p>").unwrap();
        let script = doc.find_by_tag(doc.root(), "script").unwrap();
        assert_eq!(doc.text_content(script), "if (a < b && c > d) {}");
        assert!(doc.find_by_tag(doc.root(), "p").is_some());
    }

    #[test]
    fn test_unmatched_close_tag_ignored() {
        let doc = parse_html("<div>a</span>b</div>").unwrap();
        let div = doc.find_by_tag(doc.root(), "div").unwrap();
        assert_eq!(doc.text_content(div), "ab");
    }

    #[test]
    fn test_unclosed_elements_closed_at_eof() {
        let doc = parse_html("<section><p>open").unwrap();
        let p = doc.find_by_tag(doc.root(), "p").unwrap();
        let section = doc.find_by_tag(doc.root(), "section").unwrap();
        assert_eq!(doc.parent(p), Some(section));
    }

    #[test]
    fn test_set_inner_html_replaces_children() {
        let mut doc = parse_html("<p>old <b>text</b></p>").unwrap();
        let p = doc.find_by_tag(doc.root(), "p").unwrap();
        let old_b = doc.find_by_tag(p, "b").unwrap();

        doc.set_inner_html(p, "new <i>words</i>").unwrap();

        assert_eq!(doc.text_content(p), "new words");
        assert!(!doc.is_attached(old_b));
    }

    #[test]
    fn test_fragment_close_tag_cannot_escape_parent() {
        let mut doc = parse_html("<div><p>x</p></div>").unwrap();
        let p = doc.find_by_tag(doc.root(), "p").unwrap();
        doc.set_inner_html(p, "a</p>b").unwrap();
        assert_eq!(doc.text_content(p), "ab");
    }
}
