//! # Static Export
//!
//! Produces a standalone copy of the page with every editor artifact
//! stripped. The live document is never touched.

use crate::{EditorError, EditorOptions};
use serde::{Deserialize, Serialize};
use styletrend_dom::Document;

pub const EXPORT_MIME_TYPE: &str = "text/html";
pub const EDITABLE_CLASS: &str = "editable";
pub const CONTENT_EDITABLE_ATTR: &str = "contenteditable";
pub const EDIT_MODE_ACTIVE_CLASS: &str = "edit-mode-active";

/// File the host should offer as a download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: String,
    pub contents: String,
}

/// Serialize a clean copy of `doc`
pub fn export_page(doc: &Document, options: &EditorOptions) -> Result<ExportArtifact, EditorError> {
    let mut copy = doc.clone();
    let root = copy.root();

    if let Some(toolbar) = copy.get_element_by_id(&options.toolbar_id) {
        copy.detach(toolbar);
    }

    let editor_scripts: Vec<_> = copy
        .descendants(root)
        .into_iter()
        .filter(|n| {
            copy.tag_name(*n) == Some("script")
                && copy.get_attribute(*n, "src") == Some(options.editor_script_src.as_str())
        })
        .collect();
    for script in editor_scripts {
        copy.detach(script);
    }

    for node in copy.query_selector_all(root, &format!(".{}", EDITABLE_CLASS))? {
        copy.remove_class(node, EDITABLE_CLASS);
        copy.remove_attribute(node, CONTENT_EDITABLE_ATTR);
    }

    if let Some(body) = copy.body() {
        copy.remove_class(body, EDIT_MODE_ACTIVE_CLASS);
    }

    let html = copy
        .document_element()
        .ok_or(EditorError::MissingDocumentElement)?;
    let contents = format!("<!DOCTYPE html>\n{}", copy.outer_html(html));

    tracing::debug!(bytes = contents.len(), filename = %options.export_filename, "exported page");

    Ok(ExportArtifact {
        filename: options.export_filename.clone(),
        mime_type: EXPORT_MIME_TYPE.to_string(),
        contents,
    })
}
