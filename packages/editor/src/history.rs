//! # Undo History
//!
//! Bounded stack of prior values, most recent last.
//!
//! ## Design
//!
//! - Each entry stores the state of one element *before* a tracked mutation
//! - Undo pops the newest entry and writes its value back verbatim
//! - Text is patched in place, so nested elements keep their ids
//! - Pushing past the limit silently evicts the oldest entry
//! - There is no redo: an undone entry is gone
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = HistoryStack::with_max_levels(50);
//! history.push(HistoryEntry::text(heading, doc.inner_html(heading)));
//! doc.patch_inner_html(heading, "New title")?;
//!
//! history.undo(&mut doc); // heading is back to its old content
//! ```

use crate::EditorError;
use serde::{Deserialize, Serialize};
use styletrend_dom::{Document, NodeId};

use crate::options::DEFAULT_HISTORY_LIMIT;

/// What part of the element an entry restores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChangeKind {
    /// Rendered inner markup
    Text,
    /// A single attribute, e.g. an image `src`
    Attribute { name: String },
    /// The inline CSS `transform`; an empty value means "no inline transform"
    Transform,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub target: NodeId,
    pub kind: ChangeKind,
    pub previous_value: String,
}

impl HistoryEntry {
    pub fn text(target: NodeId, previous_value: impl Into<String>) -> Self {
        Self {
            target,
            kind: ChangeKind::Text,
            previous_value: previous_value.into(),
        }
    }

    pub fn attribute(target: NodeId, name: impl Into<String>, previous_value: impl Into<String>) -> Self {
        Self {
            target,
            kind: ChangeKind::Attribute { name: name.into() },
            previous_value: previous_value.into(),
        }
    }

    pub fn transform(target: NodeId, previous_value: impl Into<String>) -> Self {
        Self {
            target,
            kind: ChangeKind::Transform,
            previous_value: previous_value.into(),
        }
    }

    /// Write `previous_value` back onto the target
    pub fn restore(&self, doc: &mut Document) -> Result<(), EditorError> {
        match &self.kind {
            ChangeKind::Text => doc.patch_inner_html(self.target, &self.previous_value)?,
            ChangeKind::Attribute { name } => {
                doc.set_attribute(self.target, name, self.previous_value.as_str())?
            }
            ChangeKind::Transform => {
                if self.previous_value.is_empty() {
                    if !doc.is_element(self.target) {
                        return Err(styletrend_dom::DomError::NotAnElement(self.target).into());
                    }
                    doc.remove_style_property(self.target, "transform");
                } else {
                    doc.set_style_property(self.target, "transform", self.previous_value.as_str())?;
                }
            }
        }
        Ok(())
    }
}

/// Undo stack for edit mode
#[derive(Debug, Clone)]
pub struct HistoryStack {
    /// Most recent last
    entries: Vec<HistoryEntry>,

    /// Maximum number of entries kept (0 = unlimited)
    max_levels: usize,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_levels,
        }
    }

    /// Record an entry, returning the evicted oldest entry if the stack overflowed
    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.entries.push(entry);

        if self.max_levels > 0 && self.entries.len() > self.max_levels {
            Some(self.entries.remove(0))
        } else {
            None
        }
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Pop the newest entry and restore it. Returns false if the stack was empty.
    ///
    /// A failed restore (target vanished or changed kind) still consumes the entry.
    pub fn undo(&mut self, doc: &mut Document) -> bool {
        let Some(entry) = self.pop() else {
            return false;
        };
        if let Err(err) = entry.restore(doc) {
            tracing::warn!(target_node = %entry.target, error = %err, "skipping history entry");
        }
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}
