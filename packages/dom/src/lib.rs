//! # Style Trend DOM
//!
//! Arena-backed document tree for the edit-mode overlay.
//!
//! Every node lives in a single arena and is addressed by a [`NodeId`].
//! Ids are never reused: a removed node keeps its slot and simply becomes
//! detached, so anything holding an id (history entries, listener tables,
//! regeneration groups) can always look it up safely.
//!
//! ```text
//! HTML text ──tokenize──▶ Token stream ──parse──▶ Document (arena)
//!                                                    │
//!                         selectors / styles / edits │
//!                                                    ▼
//!                                  serialize ──▶ HTML text
//! ```

pub mod document;
pub mod error;
pub mod parser;
pub mod reconcile;
pub mod selector;
pub mod serializer;
pub mod style;
pub mod tokenizer;

#[cfg(test)]
mod tests;

pub use document::{Attribute, Document, ElementData, Node, NodeData, NodeId};
pub use error::{DomError, DomResult};
pub use parser::{parse_html, HtmlParser};
pub use selector::{CompoundSelector, SelectorList};
pub use serializer::serialize_document;
pub use style::{InlineStyle, Transform};
pub use tokenizer::{tokenize, Token};
