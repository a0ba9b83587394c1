//! Inline `style` attribute and 2D translate+scale transforms.

use crate::selector::split_top_level;
use crate::{Document, DomResult, NodeId};
use std::fmt;

/// Parsed `style="a: b; c: d"` declarations, in source order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InlineStyle {
    pub declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn parse(source: &str) -> Self {
        let declarations = split_top_level(source, ';')
            .into_iter()
            .filter_map(|decl| {
                let (name, value) = decl.split_once(':')?;
                let name = name.trim().to_ascii_lowercase();
                let value = value.trim();
                if name.is_empty() || value.is_empty() {
                    return None;
                }
                Some((name, value.to_string()))
            })
            .collect();
        Self { declarations }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.declarations.iter_mut().find(|(n, _)| n == name) {
            Some(decl) => decl.1 = value,
            None => self.declarations.push((name.to_string(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.declarations.retain(|(n, _)| n != name);
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}: {};", name, value)?;
        }
        Ok(())
    }
}

impl Document {
    pub fn inline_style(&self, id: NodeId) -> InlineStyle {
        self.get_attribute(id, "style")
            .map(InlineStyle::parse)
            .unwrap_or_default()
    }

    pub fn get_style_property(&self, id: NodeId, name: &str) -> Option<String> {
        self.inline_style(id).get(name).map(String::from)
    }

    pub fn set_style_property(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> DomResult<()> {
        let mut style = self.inline_style(id);
        style.set(name, value);
        self.set_attribute(id, "style", style.to_string())
    }

    /// Removing the last declaration drops the `style` attribute
    pub fn remove_style_property(&mut self, id: NodeId, name: &str) {
        let mut style = self.inline_style(id);
        style.remove(name);
        if style.is_empty() {
            self.remove_attribute(id, "style");
        } else {
            let _ = self.set_attribute(id, "style", style.to_string());
        }
    }

    pub fn transform(&self, id: NodeId) -> Transform {
        self.get_style_property(id, "transform")
            .map(|t| Transform::parse(&t))
            .unwrap_or_default()
    }
}

/// Uniform-scale 2D transform: translate then scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
        }
    }

    /// Parse a CSS transform list, composing functions left to right.
    ///
    /// Understands `translate`, `translateX`, `translateY`, `scale` and
    /// `matrix`; anything else (rotate, skew) is ignored. `none` and the
    /// empty string are the identity.
    pub fn parse(source: &str) -> Self {
        let mut transform = Transform::default();
        let mut rest = source.trim();

        while let Some(open) = rest.find('(') {
            let Some(close) = rest[open..].find(')').map(|c| open + c) else {
                break;
            };
            let name = rest[..open].trim();
            let args: Vec<f64> = rest[open + 1..close]
                .split(|c: char| c == ',' || c.is_ascii_whitespace())
                .filter(|a| !a.is_empty())
                .filter_map(parse_length)
                .collect();
            transform.apply(name, &args);
            rest = &rest[close + 1..];
        }

        transform
    }

    fn apply(&mut self, function: &str, args: &[f64]) {
        match (function, args) {
            ("translate", [x]) => self.translate(*x, 0.0),
            ("translate", [x, y, ..]) => self.translate(*x, *y),
            ("translateX", [x]) => self.translate(*x, 0.0),
            ("translateY", [y]) => self.translate(0.0, *y),
            ("scale", [s, ..]) => self.scale *= s,
            ("matrix", [a, _, _, _, e, f]) => {
                self.translate(*e, *f);
                self.scale *= a;
            }
            _ => tracing::debug!(function, "ignoring unsupported transform function"),
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.translate_x += self.scale * x;
        self.translate_y += self.scale * y;
    }

    pub fn with_translation(self, translate_x: f64, translate_y: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            ..self
        }
    }

    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }
}

fn parse_length(arg: &str) -> Option<f64> {
    arg.trim().trim_end_matches("px").parse().ok()
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}
