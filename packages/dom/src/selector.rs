//! # Selectors
//!
//! Comma-separated lists of compound selectors: `h1, .cyber-item,
//! script[src="editor.js"], #editor-toolbar`. Combinators are not supported.

use crate::{Document, DomError, DomResult, NodeId};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    pub name: String,
    pub value: Option<String>,
}

/// Tag, id, classes and attribute tests that must all hold for one element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttributeSelector>,
}

impl CompoundSelector {
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(element) = doc.element(node) else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if &element.tag != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if doc.get_attribute(node, "id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| doc.has_class(node, c)) {
            return false;
        }
        self.attributes.iter().all(|attr| match &attr.value {
            Some(expected) => doc.get_attribute(node, &attr.name) == Some(expected.as_str()),
            None => doc.has_attribute(node, &attr.name),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(pub Vec<CompoundSelector>);

impl SelectorList {
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.0.iter().any(|s| s.matches(doc, node))
    }
}

impl FromStr for SelectorList {
    type Err = DomError;

    fn from_str(source: &str) -> DomResult<Self> {
        let selectors = split_top_level(source, ',')
            .into_iter()
            .map(|part| parse_compound(source, part.trim()))
            .collect::<DomResult<Vec<_>>>()?;
        Ok(SelectorList(selectors))
    }
}

/// Split on `sep` outside quotes, brackets and parentheses
pub(crate) fn split_top_level(source: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in source.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth = depth.saturating_sub(1),
            (None, c) if c == sep && depth == 0 => {
                parts.push(&source[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&source[start..]);
    parts
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident<'a>(full: &str, rest: &'a str) -> DomResult<(&'a str, &'a str)> {
    let end = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
    if end == 0 {
        return Err(DomError::invalid_selector(full, "expected identifier"));
    }
    Ok((&rest[..end], &rest[end..]))
}

fn parse_compound(full: &str, part: &str) -> DomResult<CompoundSelector> {
    if part.is_empty() {
        return Err(DomError::invalid_selector(full, "empty selector"));
    }

    let mut selector = CompoundSelector::default();
    let mut rest = part;

    if let Some(after) = rest.strip_prefix('*') {
        rest = after;
    } else if rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        let (tag, after) = take_ident(full, rest)?;
        selector.tag = Some(tag.to_ascii_lowercase());
        rest = after;
    }

    while let Some(c) = rest.chars().next() {
        match c {
            '#' => {
                let (id, after) = take_ident(full, &rest[1..])?;
                selector.id = Some(id.to_string());
                rest = after;
            }
            '.' => {
                let (class, after) = take_ident(full, &rest[1..])?;
                selector.classes.push(class.to_string());
                rest = after;
            }
            '[' => {
                let close = rest
                    .find(']')
                    .ok_or_else(|| DomError::invalid_selector(full, "unterminated attribute selector"))?;
                selector.attributes.push(parse_attribute_selector(full, &rest[1..close])?);
                rest = &rest[close + 1..];
            }
            c if c.is_ascii_whitespace() || c == '>' || c == '+' || c == '~' => {
                return Err(DomError::invalid_selector(full, "combinators are not supported"));
            }
            other => {
                return Err(DomError::invalid_selector(
                    full,
                    format!("unexpected character '{}'", other),
                ));
            }
        }
    }

    Ok(selector)
}

fn parse_attribute_selector(full: &str, body: &str) -> DomResult<AttributeSelector> {
    let Some((name, value)) = body.split_once('=') else {
        let name = body.trim();
        if name.is_empty() {
            return Err(DomError::invalid_selector(full, "empty attribute selector"));
        }
        return Ok(AttributeSelector {
            name: name.to_ascii_lowercase(),
            value: None,
        });
    };

    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);

    Ok(AttributeSelector {
        name: name.trim().to_ascii_lowercase(),
        value: Some(value.to_string()),
    })
}

impl Document {
    /// All elements below `scope` matching `selectors`, in document order
    pub fn select(&self, scope: NodeId, selectors: &SelectorList) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| selectors.matches(self, *id))
            .collect()
    }

    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        let selectors: SelectorList = selector.parse()?;
        Ok(self.select(scope, &selectors))
    }

    pub fn query_selector(&self, scope: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let selectors: SelectorList = selector.parse()?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .find(|id| selectors.matches(self, *id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_html;

    #[test]
    fn test_comma_inside_attribute_value() {
        let list: SelectorList = r#"img[alt="red, blue"], h1"#.parse().unwrap();
        assert_eq!(list.0.len(), 2);
        assert_eq!(list.0[0].attributes[0].value.as_deref(), Some("red, blue"));

        let doc = parse_html(r#"<img alt="red, blue"><img alt="red">"#).unwrap();
        let imgs = doc.query_selector_all(doc.root(), r#"img[alt="red, blue"]"#).unwrap();
        assert_eq!(imgs.len(), 1);
    }

    #[test]
    fn test_parse_selector_list() {
        let list: SelectorList = r#"h1, .cyber-item, script[src="editor.js"], #editor-toolbar"#
            .parse()
            .unwrap();
        assert_eq!(list.0.len(), 4);
        assert_eq!(list.0[0].tag.as_deref(), Some("h1"));
        assert_eq!(list.0[1].classes, vec!["cyber-item"]);
        assert_eq!(
            list.0[2].attributes,
            vec![AttributeSelector {
                name: "src".to_string(),
                value: Some("editor.js".to_string())
            }]
        );
        assert_eq!(list.0[3].id.as_deref(), Some("editor-toolbar"));
    }

    #[test]
    fn test_rejects_combinators() {
        assert!("div p".parse::<SelectorList>().is_err());
        assert!("div > p".parse::<SelectorList>().is_err());
        assert!("h1,".parse::<SelectorList>().is_err());
    }

    #[test]
    fn test_query_in_document_order() {
        let doc = parse_html(
            r#"<body><p id="a"></p><div class="cyber-item"><h2 id="b"></h2></div><img id="c"></body>"#,
        )
        .unwrap();

        let found = doc
            .query_selector_all(doc.root(), "img, h2, p, .cyber-item")
            .unwrap();
        let ids: Vec<_> = found
            .iter()
            .map(|n| doc.get_attribute(*n, "id").unwrap_or("div"))
            .collect();
        assert_eq!(ids, vec!["a", "div", "b", "c"]);
    }

    #[test]
    fn test_scoped_query_excludes_scope() {
        let doc = parse_html(r#"<div class="w"><div class="w" id="inner"></div></div>"#).unwrap();
        let outer = doc.query_selector(doc.root(), ".w").unwrap().unwrap();
        let inner = doc.query_selector(outer, ".w").unwrap().unwrap();
        assert_eq!(doc.get_attribute(inner, "id"), Some("inner"));
    }

    #[test]
    fn test_compound_requires_all_parts() {
        let doc = parse_html(r#"<p class="a b" data-x></p><p class="a"></p>"#).unwrap();
        assert_eq!(doc.query_selector_all(doc.root(), "p.a.b").unwrap().len(), 1);
        assert_eq!(doc.query_selector_all(doc.root(), "p[data-x]").unwrap().len(), 1);
        assert_eq!(doc.query_selector_all(doc.root(), "*.a").unwrap().len(), 2);
    }
}
