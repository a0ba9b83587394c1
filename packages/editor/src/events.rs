//! Input events delivered by the host page.

use crate::ExportArtifact;
use serde::{Deserialize, Serialize};

/// A user-input event aimed at one node.
///
/// Pointer coordinates are client-space pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorEvent {
    Click,
    Focus,
    Blur,
    /// Content of a text-editable element after the user typed
    Input { html: String },
    DoubleClick,
    MouseDown {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    MouseMove { x: f64, y: f64 },
    MouseUp,
    Wheel {
        #[serde(rename = "deltaY")]
        delta_y: f64,
        #[serde(default)]
        ctrl: bool,
    },
    KeyDown {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
    },
}

/// What the host should do after dispatching an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub handled: bool,
    pub prevent_default: bool,
    pub stop_propagation: bool,
    /// Set when the event triggered an export; the host should download it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportArtifact>,
}

impl EventResponse {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    /// Handled, and the browser's default action must be suppressed
    pub fn consumed() -> Self {
        Self {
            handled: true,
            prevent_default: true,
            stop_propagation: true,
            export: None,
        }
    }
}

/// Modal text prompt (`window.prompt` in a browser)
pub trait Prompt {
    /// Returns `None` when the user cancels
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
}

impl<F> Prompt for F
where
    F: FnMut(&str, &str) -> Option<String>,
{
    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        self(message, default)
    }
}

/// Prompt that always answers with the same response
#[derive(Debug, Clone, Default)]
pub struct CannedPrompt(pub Option<String>);

impl Prompt for CannedPrompt {
    fn prompt(&mut self, _message: &str, _default: &str) -> Option<String> {
        self.0.clone()
    }
}
