use serde::Deserialize;
use styletrend_dom::{parse_html, serialize_document, Document, NodeId};
use styletrend_editor::{CannedPrompt, EditModeController, EditorEvent, EditorOptions};
use styletrend_regen::{ManualClock, RegenOptions, RegenerationSimulator};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Option blocks accepted by the `EditorSession` constructor
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SessionOptions {
    editor: EditorOptions,
    regen: RegenOptions,
}

/// One page under edit, plus its regeneration wrappers
#[wasm_bindgen]
pub struct EditorSession {
    doc: Document,
    editor: EditModeController,
    regen: RegenerationSimulator,
    clock: ManualClock,
    /// Latest host time seen by a regeneration call
    now_ms: u64,
}

#[wasm_bindgen]
impl EditorSession {
    #[wasm_bindgen(constructor)]
    pub fn new(html: &str, options_json: Option<String>) -> Result<EditorSession, JsValue> {
        let options: SessionOptions = match options_json {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| JsValue::from_str(&format!("Options error: {}", e)))?,
            None => SessionOptions::default(),
        };

        let mut doc =
            parse_html(html).map_err(|e| JsValue::from_str(&format!("Parse error: {}", e)))?;

        let mut editor = EditModeController::new(options.editor)
            .map_err(|e| JsValue::from_str(&format!("Editor error: {}", e)))?;
        editor
            .install(&mut doc)
            .map_err(|e| JsValue::from_str(&format!("Editor error: {}", e)))?;

        let regen = RegenerationSimulator::discover(&doc, options.regen)
            .map_err(|e| JsValue::from_str(&format!("Regeneration error: {}", e)))?;

        Ok(EditorSession {
            doc,
            editor,
            regen,
            clock: ManualClock::default(),
            now_ms: 0,
        })
    }

    /// Route an event (JSON, tagged by `type`) to the node. Returns the
    /// response as JSON.
    pub fn dispatch(
        &mut self,
        node_id: u32,
        event_json: &str,
        prompt_response: Option<String>,
    ) -> Result<String, JsValue> {
        let event: EditorEvent = serde_json::from_str(event_json)
            .map_err(|e| JsValue::from_str(&format!("Event error: {}", e)))?;
        let mut prompt = CannedPrompt(prompt_response);

        let response = self
            .editor
            .dispatch(&mut self.doc, NodeId(node_id), event, &mut prompt);

        serde_json::to_string(&response)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = toggleEditMode)]
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.editor.toggle_edit_mode(&mut self.doc)
    }

    #[wasm_bindgen(js_name = isEditing)]
    pub fn is_editing(&self) -> bool {
        self.editor.is_enabled()
    }

    pub fn undo(&mut self) -> bool {
        self.editor.undo_last_action(&mut self.doc)
    }

    #[wasm_bindgen(js_name = historyLength)]
    pub fn history_length(&self) -> usize {
        self.editor.history().len()
    }

    /// Clean standalone HTML as `{ filename, mimeType, contents }` JSON
    #[wasm_bindgen(js_name = exportPage)]
    pub fn export_page(&self) -> Result<String, JsValue> {
        let artifact = self
            .editor
            .export_page(&self.doc)
            .map_err(|e| JsValue::from_str(&format!("Export error: {}", e)))?;

        serde_json::to_string(&artifact)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Node ids matching `selector`, in document order
    pub fn query(&self, selector: &str) -> Result<Vec<u32>, JsValue> {
        let nodes = self
            .doc
            .query_selector_all(self.doc.root(), selector)
            .map_err(|e| JsValue::from_str(&format!("Selector error: {}", e)))?;

        Ok(nodes.into_iter().map(|n| n.0).collect())
    }

    #[wasm_bindgen(js_name = innerHtml)]
    pub fn inner_html(&self, node_id: u32) -> String {
        self.doc.inner_html(NodeId(node_id))
    }

    #[wasm_bindgen(js_name = getAttribute)]
    pub fn get_attribute(&self, node_id: u32, name: &str) -> Option<String> {
        self.doc.get_attribute(NodeId(node_id), name).map(String::from)
    }

    /// Click on a regeneration button (or anything inside one).
    /// Returns false when the node is not a button or the wrapper is busy.
    #[wasm_bindgen(js_name = regenClick)]
    pub fn regen_click(&mut self, button_id: u32, now_ms: f64) -> Result<bool, JsValue> {
        self.now_ms = now_ms as u64;
        let Some(group) = self.regen.group_for_button(&self.doc, NodeId(button_id)) else {
            return Ok(false);
        };

        self.regen
            .click(&mut self.doc, group, self.now_ms)
            .map_err(|e| JsValue::from_str(&format!("Regeneration error: {}", e)))
    }

    /// Run due timers. `timestamp_ms` is the wall-clock value used for
    /// cache busting.
    #[wasm_bindgen(js_name = regenAdvance)]
    pub fn regen_advance(&mut self, now_ms: f64, timestamp_ms: f64) -> Result<usize, JsValue> {
        self.now_ms = now_ms as u64;
        self.clock.set(timestamp_ms as i64);

        self.regen
            .advance(&mut self.doc, self.now_ms, &self.clock)
            .map_err(|e| JsValue::from_str(&format!("Regeneration error: {}", e)))
    }

    #[wasm_bindgen(js_name = regenImageLoaded)]
    pub fn regen_image_loaded(&mut self, image_id: u32) -> bool {
        self.regen
            .image_loaded(&mut self.doc, NodeId(image_id), self.now_ms)
    }

    /// Host time at which the next regeneration timer is due
    #[wasm_bindgen(js_name = regenNextDeadline)]
    pub fn regen_next_deadline(&self) -> Option<f64> {
        self.regen.next_deadline().map(|d| d as f64)
    }

    pub fn html(&self) -> String {
        serialize_document(&self.doc)
    }
}
