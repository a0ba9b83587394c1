//! # Style Trend Editor
//!
//! Edit-mode overlay for a static page: direct manipulation of text, images,
//! position and scale, a bounded undo history, and static export.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: browser binding / CLI replay          │
//! │  - forwards input events with a NodeId      │
//! │  - answers prompts, performs downloads      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditModeController                  │
//! │  - edit-mode flag + toolbar                 │
//! │  - listener table (node, capability)        │
//! │  - history stack (bounded, no redo)         │
//! │  - export of a cleaned document copy        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ dom: arena Document                         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use styletrend_editor::{CannedPrompt, EditModeController, EditorEvent, EditorOptions};
//!
//! let mut doc = styletrend_dom::parse_html(&page)?;
//! let mut editor = EditModeController::new(EditorOptions::default())?;
//! editor.install(&mut doc)?;
//! editor.toggle_edit_mode(&mut doc);
//!
//! editor.dispatch(&mut doc, heading, EditorEvent::Focus, &mut CannedPrompt(None));
//! editor.dispatch(&mut doc, heading, EditorEvent::Input { html: "New".into() }, &mut CannedPrompt(None));
//! editor.undo_last_action(&mut doc);
//!
//! let artifact = editor.export_page(&doc)?;
//! ```

mod controller;
mod errors;
mod events;
mod export;
mod history;
mod listeners;
mod options;
mod toolbar;

pub use controller::{EditModeController, IMAGE_PROMPT};
pub use errors::EditorError;
pub use events::{CannedPrompt, EditorEvent, EventResponse, Prompt};
pub use export::{
    export_page, ExportArtifact, CONTENT_EDITABLE_ATTR, EDITABLE_CLASS, EDIT_MODE_ACTIVE_CLASS,
    EXPORT_MIME_TYPE,
};
pub use history::{ChangeKind, HistoryEntry, HistoryStack};
pub use listeners::{Capability, ListenerId, ListenerTable};
pub use options::{EditorOptions, DEFAULT_EDITABLE_SELECTOR, DEFAULT_EXPORT_FILENAME, DEFAULT_HISTORY_LIMIT};
pub use toolbar::{Toolbar, ToolbarAction, DISABLE_LABEL, ENABLE_LABEL};

// Re-export the document model for convenience
pub use styletrend_dom::{Document, NodeId};
