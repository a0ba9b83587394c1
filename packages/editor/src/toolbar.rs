//! Editor toolbar injected into the page body.

use crate::{EditorError, EditorOptions};
use styletrend_dom::{Document, NodeId};

pub const TOGGLE_BUTTON_ID: &str = "toggle-edit";
pub const UNDO_BUTTON_ID: &str = "undo-btn";
pub const EXPORT_BUTTON_ID: &str = "export-btn";

pub const ENABLE_LABEL: &str = "Enable Edit Mode";
pub const DISABLE_LABEL: &str = "Disable Edit Mode";

const TOOLBAR_MARKUP: &str = concat!(
    r#"<button id="toggle-edit">Enable Edit Mode</button>"#,
    r#"<button id="undo-btn">Undo (Ctrl+Z)</button>"#,
    r#"<button id="export-btn">Export HTML</button>"#,
);

/// Handles to the injected toolbar controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolbar {
    pub container: NodeId,
    pub toggle: NodeId,
    pub undo: NodeId,
    pub export: NodeId,
}

/// Toolbar control hit by a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Toggle,
    Undo,
    Export,
}

impl Toolbar {
    /// Append the toolbar to `<body>`
    pub fn install(doc: &mut Document, options: &EditorOptions) -> Result<Self, EditorError> {
        let body = doc.body().ok_or(EditorError::MissingBody)?;

        let container = doc.create_element("div");
        doc.set_attribute(container, "id", options.toolbar_id.as_str())?;
        doc.append_child(body, container)?;
        doc.append_html(container, TOOLBAR_MARKUP)?;

        let find = |doc: &Document, id: &str| -> Result<NodeId, EditorError> {
            doc.descendants(container)
                .into_iter()
                .find(|n| doc.get_attribute(*n, "id") == Some(id))
                .ok_or(EditorError::Dom(styletrend_dom::DomError::NodeNotFound(container)))
        };

        Ok(Self {
            container,
            toggle: find(doc, TOGGLE_BUTTON_ID)?,
            undo: find(doc, UNDO_BUTTON_ID)?,
            export: find(doc, EXPORT_BUTTON_ID)?,
        })
    }

    /// Which control (if any) a click on `target` activates
    pub fn action_for(&self, doc: &Document, target: NodeId) -> Option<ToolbarAction> {
        // Clicks on a button's label text land on the text node
        let button = if doc.is_element(target) {
            target
        } else {
            doc.parent(target)?
        };
        if button == self.toggle {
            Some(ToolbarAction::Toggle)
        } else if button == self.undo {
            Some(ToolbarAction::Undo)
        } else if button == self.export {
            Some(ToolbarAction::Export)
        } else {
            None
        }
    }

    /// Reflect the edit-mode flag in the toggle label and `active` class
    pub fn show_state(&self, doc: &mut Document, enabled: bool) -> Result<(), EditorError> {
        if enabled {
            doc.set_text_content(self.toggle, DISABLE_LABEL)?;
            doc.add_class(self.toggle, "active")?;
        } else {
            doc.set_text_content(self.toggle, ENABLE_LABEL)?;
            doc.remove_class(self.toggle, "active");
        }
        Ok(())
    }
}
