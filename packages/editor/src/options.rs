use serde::{Deserialize, Serialize};

pub const DEFAULT_EDITABLE_SELECTOR: &str = "h1, h2, h3, p, img, .cyber-item, .cyber-overlay";
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
pub const DEFAULT_EXPORT_FILENAME: &str = "fashion_trend_report_static.html";

/// Editor behaviour knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorOptions {
    /// Elements that receive interaction capabilities when edit mode turns on
    pub editable_selector: String,

    /// Tags that are marked editable but never become text-editable
    pub container_tags: Vec<String>,

    /// Maximum number of undo entries (0 = unlimited)
    pub history_limit: usize,

    /// Scale change per wheel tick
    pub scale_step: f64,

    /// Lower bound for wheel scaling
    pub min_scale: f64,

    /// Download name of the exported page
    pub export_filename: String,

    /// Id of the injected toolbar
    pub toolbar_id: String,

    /// `src` of the editor's own script tag, stripped on export
    pub editor_script_src: String,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            editable_selector: DEFAULT_EDITABLE_SELECTOR.to_string(),
            container_tags: vec!["img".to_string(), "div".to_string(), "section".to_string()],
            history_limit: DEFAULT_HISTORY_LIMIT,
            scale_step: 0.05,
            min_scale: 0.1,
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            toolbar_id: "editor-toolbar".to_string(),
            editor_script_src: "editor.js".to_string(),
        }
    }
}

impl EditorOptions {
    pub fn is_container_tag(&self, tag: &str) -> bool {
        self.container_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
