//! # Edit-Mode Controller
//!
//! Owns the edit-mode flag, the undo history and the listener table. The
//! document is passed in by reference on every call, so the controller can
//! drive a live page binding or a plain in-memory [`Document`] alike.
//!
//! ## Capabilities installed on enable
//!
//! | Capability     | Trigger                 | History                        |
//! |----------------|-------------------------|--------------------------------|
//! | `TextEdit`     | focus / input / blur    | one `Text` entry per focus     |
//! | `ImageReplace` | double-click + prompt   | one `Attribute(src)` entry     |
//! | `Drag`         | Shift + mouse down/move | one `Transform` entry per drag |
//! | `Scale`        | wheel (Ctrl passes)     | none                           |
//!
//! Capabilities are attached only to elements that exist when edit mode is
//! switched on; nodes inserted afterwards stay inert until the next toggle.

use crate::export::{CONTENT_EDITABLE_ATTR, EDITABLE_CLASS, EDIT_MODE_ACTIVE_CLASS};
use crate::toolbar::{Toolbar, ToolbarAction};
use crate::{
    export_page, Capability, EditorError, EditorEvent, EditorOptions, EventResponse,
    ExportArtifact, HistoryEntry, HistoryStack, ListenerTable, Prompt,
};
use styletrend_dom::{Document, NodeId, SelectorList, Transform};

pub const IMAGE_PROMPT: &str = "Enter new image URL:";

/// In-flight Shift+drag
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    target: NodeId,
    start_x: f64,
    start_y: f64,
    initial: Transform,
}

#[derive(Debug)]
pub struct EditModeController {
    options: EditorOptions,
    editable: SelectorList,
    enabled: bool,
    history: HistoryStack,
    listeners: ListenerTable,
    toolbar: Option<Toolbar>,
    /// Element inside an open text-edit focus session
    focused: Option<NodeId>,
    drag: Option<DragSession>,
}

impl EditModeController {
    /// Fails only if the configured editable selector is malformed
    pub fn new(options: EditorOptions) -> Result<Self, EditorError> {
        let editable: SelectorList = options.editable_selector.parse()?;
        Ok(Self {
            history: HistoryStack::with_max_levels(options.history_limit),
            options,
            editable,
            enabled: false,
            listeners: ListenerTable::new(),
            toolbar: None,
            focused: None,
            drag: None,
        })
    }

    /// Inject the toolbar. Calling again is a no-op.
    pub fn install(&mut self, doc: &mut Document) -> Result<Toolbar, EditorError> {
        if let Some(toolbar) = self.toolbar {
            return Ok(toolbar);
        }
        let toolbar = Toolbar::install(doc, &self.options)?;
        tracing::debug!(container = %toolbar.container, "installed editor toolbar");
        self.toolbar = Some(toolbar);
        Ok(toolbar)
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn listeners(&self) -> &ListenerTable {
        &self.listeners
    }

    pub fn toolbar(&self) -> Option<Toolbar> {
        self.toolbar
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Flip edit mode, returning the new state
    pub fn toggle_edit_mode(&mut self, doc: &mut Document) -> bool {
        self.enabled = !self.enabled;

        if let Some(toolbar) = self.toolbar {
            if let Err(err) = toolbar.show_state(doc, self.enabled) {
                tracing::warn!(error = %err, "toolbar state not updated");
            }
        }

        if let Some(body) = doc.body() {
            if self.enabled {
                if let Err(err) = doc.add_class(body, EDIT_MODE_ACTIVE_CLASS) {
                    tracing::warn!(error = %err, "body not marked as editing");
                }
            } else {
                doc.remove_class(body, EDIT_MODE_ACTIVE_CLASS);
            }
        }

        if self.enabled {
            self.enable_interactions(doc);
        } else {
            self.disable_interactions(doc);
        }

        tracing::debug!(enabled = self.enabled, "toggled edit mode");
        self.enabled
    }

    fn enable_interactions(&mut self, doc: &mut Document) {
        let targets = doc.select(doc.root(), &self.editable);

        for node in &targets {
            let node = *node;
            let Some(tag) = doc.tag_name(node).map(String::from) else {
                continue;
            };
            if let Err(err) = doc.add_class(node, EDITABLE_CLASS) {
                tracing::warn!(target_node = %node, error = %err, "editable class not added");
                continue;
            }

            if !self.options.is_container_tag(&tag) {
                if let Err(err) = doc.set_attribute(node, CONTENT_EDITABLE_ATTR, "true") {
                    tracing::warn!(target_node = %node, error = %err, "contenteditable not set");
                    continue;
                }
                self.listeners.register(node, Capability::TextEdit);
            }
            if tag == "img" {
                self.listeners.register(node, Capability::ImageReplace);
            }
            self.listeners.register(node, Capability::Drag);
            self.listeners.register(node, Capability::Scale);
        }

        tracing::debug!(elements = targets.len(), listeners = self.listeners.len(), "enabled interactions");
    }

    /// Strip the editable marker and every installed capability
    pub fn disable_interactions(&mut self, doc: &mut Document) {
        let marked = doc
            .query_selector_all(doc.root(), &format!(".{}", EDITABLE_CLASS))
            .unwrap_or_default();

        for node in &marked {
            doc.remove_class(*node, EDITABLE_CLASS);
            doc.remove_attribute(*node, CONTENT_EDITABLE_ATTR);
        }

        let removed = self.listeners.len();
        self.listeners.clear();
        self.focused = None;
        self.drag = None;

        tracing::debug!(elements = marked.len(), listeners = removed, "disabled interactions");
    }

    /// Restore the most recent history entry. Returns false if there was none.
    pub fn undo_last_action(&mut self, doc: &mut Document) -> bool {
        let undone = self.history.undo(doc);
        if undone {
            tracing::debug!(remaining = self.history.len(), "undid last action");
        }
        undone
    }

    pub fn export_page(&self, doc: &Document) -> Result<ExportArtifact, EditorError> {
        export_page(doc, &self.options)
    }

    fn record(&mut self, entry: HistoryEntry) {
        if let Some(evicted) = self.history.push(entry) {
            tracing::debug!(target_node = %evicted.target, "evicted oldest history entry");
        }
    }

    /// Route one input event
    pub fn dispatch(
        &mut self,
        doc: &mut Document,
        target: NodeId,
        event: EditorEvent,
        prompt: &mut dyn Prompt,
    ) -> EventResponse {
        match event {
            EditorEvent::Click => self.on_click(doc, target),
            EditorEvent::Focus => self.on_focus(doc, target),
            EditorEvent::Blur => self.on_blur(target),
            EditorEvent::Input { html } => self.on_input(doc, target, &html),
            EditorEvent::DoubleClick => self.on_double_click(doc, target, prompt),
            EditorEvent::MouseDown { x, y, shift } => self.on_mouse_down(doc, target, x, y, shift),
            EditorEvent::MouseMove { x, y } => self.on_mouse_move(doc, x, y),
            EditorEvent::MouseUp => self.on_mouse_up(),
            EditorEvent::Wheel { delta_y, ctrl } => self.on_wheel(doc, target, delta_y, ctrl),
            EditorEvent::KeyDown { key, ctrl, meta } => self.on_key_down(doc, &key, ctrl, meta),
        }
    }

    fn on_click(&mut self, doc: &mut Document, target: NodeId) -> EventResponse {
        let Some(action) = self.toolbar.and_then(|t| t.action_for(&*doc, target)) else {
            return EventResponse::ignored();
        };

        match action {
            ToolbarAction::Toggle => {
                self.toggle_edit_mode(doc);
                EventResponse::handled()
            }
            ToolbarAction::Undo => {
                self.undo_last_action(doc);
                EventResponse::handled()
            }
            ToolbarAction::Export => match self.export_page(doc) {
                Ok(artifact) => EventResponse {
                    export: Some(artifact),
                    ..EventResponse::handled()
                },
                Err(err) => {
                    tracing::error!(error = %err, "export failed");
                    EventResponse::handled()
                }
            },
        }
    }

    fn on_focus(&mut self, doc: &Document, target: NodeId) -> EventResponse {
        if !self.enabled || !self.listeners.has(target, Capability::TextEdit) {
            return EventResponse::ignored();
        }
        if self.focused == Some(target) {
            return EventResponse::handled();
        }
        self.focused = Some(target);
        self.record(HistoryEntry::text(target, doc.inner_html(target)));
        EventResponse::handled()
    }

    fn on_blur(&mut self, target: NodeId) -> EventResponse {
        if self.focused != Some(target) {
            return EventResponse::ignored();
        }
        self.focused = None;
        EventResponse::handled()
    }

    fn on_input(&mut self, doc: &mut Document, target: NodeId, html: &str) -> EventResponse {
        if !self.enabled || !self.listeners.has(target, Capability::TextEdit) {
            return EventResponse::ignored();
        }
        match doc.patch_inner_html(target, html) {
            Ok(()) => EventResponse::handled(),
            Err(err) => {
                tracing::warn!(target_node = %target, error = %err, "rejected text input");
                EventResponse::ignored()
            }
        }
    }

    fn on_double_click(
        &mut self,
        doc: &mut Document,
        target: NodeId,
        prompt: &mut dyn Prompt,
    ) -> EventResponse {
        if !self.enabled || !self.listeners.has(target, Capability::ImageReplace) {
            return EventResponse::ignored();
        }

        let old_src = doc.get_attribute(target, "src").unwrap_or_default().to_string();
        let new_src = match prompt.prompt(IMAGE_PROMPT, &old_src) {
            Some(url) if !url.is_empty() && url != old_src => url,
            _ => return EventResponse::handled(),
        };

        self.record(HistoryEntry::attribute(target, "src", old_src));
        if let Err(err) = doc.set_attribute(target, "src", new_src) {
            tracing::warn!(target_node = %target, error = %err, "image source not replaced");
        }
        EventResponse::handled()
    }

    fn on_mouse_down(
        &mut self,
        doc: &mut Document,
        target: NodeId,
        x: f64,
        y: f64,
        shift: bool,
    ) -> EventResponse {
        if !self.enabled || !shift || !self.listeners.has(target, Capability::Drag) {
            return EventResponse::ignored();
        }

        let previous = doc.get_style_property(target, "transform").unwrap_or_default();
        let initial = Transform::parse(&previous);
        self.record(HistoryEntry::transform(target, previous));

        self.drag = Some(DragSession {
            target,
            start_x: x,
            start_y: y,
            initial,
        });
        EventResponse::consumed()
    }

    fn on_mouse_move(&mut self, doc: &mut Document, x: f64, y: f64) -> EventResponse {
        let Some(drag) = self.drag else {
            return EventResponse::ignored();
        };

        let moved = drag.initial.with_translation(
            drag.initial.translate_x + (x - drag.start_x),
            drag.initial.translate_y + (y - drag.start_y),
        );
        if let Err(err) = doc.set_style_property(drag.target, "transform", moved.to_string()) {
            tracing::warn!(target_node = %drag.target, error = %err, "drag update dropped");
        }
        EventResponse::handled()
    }

    fn on_mouse_up(&mut self) -> EventResponse {
        match self.drag.take() {
            Some(_) => EventResponse::handled(),
            None => EventResponse::ignored(),
        }
    }

    fn on_wheel(&mut self, doc: &mut Document, target: NodeId, delta_y: f64, ctrl: bool) -> EventResponse {
        // Ctrl+wheel is left to the browser's page zoom
        if !self.enabled || ctrl || !self.listeners.has(target, Capability::Scale) {
            return EventResponse::ignored();
        }

        // Scaling is not recorded in history
        let current = doc.transform(target);
        let step = if delta_y < 0.0 {
            self.options.scale_step
        } else {
            -self.options.scale_step
        };
        let scale = (current.scale + step).max(self.options.min_scale);

        if let Err(err) = doc.set_style_property(target, "transform", current.with_scale(scale).to_string()) {
            tracing::warn!(target_node = %target, error = %err, "scale update dropped");
        }
        EventResponse::consumed()
    }

    fn on_key_down(&mut self, doc: &mut Document, key: &str, ctrl: bool, meta: bool) -> EventResponse {
        if (ctrl || meta) && key == "z" {
            self.undo_last_action(doc);
            return EventResponse {
                prevent_default: true,
                ..EventResponse::handled()
            };
        }
        EventResponse::ignored()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CannedPrompt;
    use styletrend_dom::parse_html;

    fn setup(source: &str) -> (Document, EditModeController) {
        let mut doc = parse_html(source).unwrap();
        let mut controller = EditModeController::new(EditorOptions::default()).unwrap();
        controller.install(&mut doc).unwrap();
        (doc, controller)
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let options = EditorOptions {
            editable_selector: "div > p".to_string(),
            ..EditorOptions::default()
        };
        assert!(matches!(
            EditModeController::new(options),
            Err(EditorError::Dom(_))
        ));
    }

    #[test]
    fn test_install_twice_is_noop() {
        let (mut doc, mut controller) = setup("<body></body>");
        let first = controller.toolbar().unwrap();
        let second = controller.install(&mut doc).unwrap();
        assert_eq!(first, second);
        assert_eq!(doc.children(doc.body().unwrap()).len(), 1);
    }

    #[test]
    fn test_capabilities_by_tag() {
        let (mut doc, mut controller) =
            setup(r#"<body><p>t</p><img src="a.jpg"><div class="cyber-item"></div></body>"#);
        controller.toggle_edit_mode(&mut doc);

        let p = doc.find_by_tag(doc.root(), "p").unwrap();
        let img = doc.find_by_tag(doc.root(), "img").unwrap();
        let div = doc.query_selector(doc.root(), ".cyber-item").unwrap().unwrap();

        let listeners = controller.listeners();
        assert_eq!(
            listeners.capabilities(p),
            vec![Capability::TextEdit, Capability::Drag, Capability::Scale]
        );
        assert_eq!(
            listeners.capabilities(img),
            vec![Capability::ImageReplace, Capability::Drag, Capability::Scale]
        );
        assert_eq!(listeners.capabilities(div), vec![Capability::Drag, Capability::Scale]);

        assert_eq!(doc.get_attribute(p, "contenteditable"), Some("true"));
        assert!(!doc.has_attribute(img, "contenteditable"));
        assert!(doc.has_class(div, "editable"));
    }

    #[test]
    fn test_events_ignored_when_disabled() {
        let (mut doc, mut controller) = setup(r#"<body><img src="a.jpg"></body>"#);
        let img = doc.find_by_tag(doc.root(), "img").unwrap();
        let mut prompt = CannedPrompt(Some("b.jpg".to_string()));

        let response = controller.dispatch(&mut doc, img, EditorEvent::DoubleClick, &mut prompt);
        assert!(!response.handled);
        assert_eq!(doc.get_attribute(img, "src"), Some("a.jpg"));
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_focus_session_records_once() {
        let (mut doc, mut controller) = setup("<body><h2>A</h2></body>");
        controller.toggle_edit_mode(&mut doc);
        let h2 = doc.find_by_tag(doc.root(), "h2").unwrap();
        let mut prompt = CannedPrompt(None);

        controller.dispatch(&mut doc, h2, EditorEvent::Focus, &mut prompt);
        controller.dispatch(&mut doc, h2, EditorEvent::Input { html: "AB".into() }, &mut prompt);
        controller.dispatch(&mut doc, h2, EditorEvent::Focus, &mut prompt);
        controller.dispatch(&mut doc, h2, EditorEvent::Input { html: "ABC".into() }, &mut prompt);
        assert_eq!(controller.history().len(), 1);

        controller.dispatch(&mut doc, h2, EditorEvent::Blur, &mut prompt);
        controller.dispatch(&mut doc, h2, EditorEvent::Focus, &mut prompt);
        assert_eq!(controller.history().len(), 2);
    }

    #[test]
    fn test_drag_without_shift_passes_through() {
        let (mut doc, mut controller) = setup("<body><h1>x</h1></body>");
        controller.toggle_edit_mode(&mut doc);
        let h1 = doc.find_by_tag(doc.root(), "h1").unwrap();
        let mut prompt = CannedPrompt(None);

        let response = controller.dispatch(
            &mut doc,
            h1,
            EditorEvent::MouseDown { x: 0.0, y: 0.0, shift: false },
            &mut prompt,
        );
        assert!(!response.handled);
        assert!(!controller.is_dragging());
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_wheel_scaling_floors_and_skips_history() {
        let (mut doc, mut controller) = setup("<body><h1>x</h1></body>");
        controller.toggle_edit_mode(&mut doc);
        let h1 = doc.find_by_tag(doc.root(), "h1").unwrap();
        let mut prompt = CannedPrompt(None);

        for _ in 0..40 {
            controller.dispatch(
                &mut doc,
                h1,
                EditorEvent::Wheel { delta_y: 100.0, ctrl: false },
                &mut prompt,
            );
        }

        let scale = doc.transform(h1).scale;
        assert!((scale - 0.1).abs() < 1e-9, "scale was {scale}");
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_ctrl_wheel_passes_to_browser_zoom() {
        let (mut doc, mut controller) = setup("<body><h1>x</h1></body>");
        controller.toggle_edit_mode(&mut doc);
        let h1 = doc.find_by_tag(doc.root(), "h1").unwrap();
        let mut prompt = CannedPrompt(None);

        let response = controller.dispatch(
            &mut doc,
            h1,
            EditorEvent::Wheel { delta_y: -100.0, ctrl: true },
            &mut prompt,
        );
        assert!(!response.prevent_default);
        assert!(!doc.has_attribute(h1, "style"));
    }

    #[test]
    fn test_undo_shortcut_prevents_default() {
        let (mut doc, mut controller) = setup("<body></body>");
        let root = doc.root();
        let mut prompt = CannedPrompt(None);

        let response = controller.dispatch(
            &mut doc,
            root,
            EditorEvent::KeyDown { key: "z".into(), ctrl: false, meta: true },
            &mut prompt,
        );
        assert!(response.prevent_default);

        let response = controller.dispatch(
            &mut doc,
            root,
            EditorEvent::KeyDown { key: "y".into(), ctrl: true, meta: false },
            &mut prompt,
        );
        assert!(!response.handled);
    }

    #[test]
    fn test_disable_ends_drag() {
        let (mut doc, mut controller) = setup("<body><p>x</p></body>");
        controller.toggle_edit_mode(&mut doc);
        let p = doc.find_by_tag(doc.root(), "p").unwrap();
        let mut prompt = CannedPrompt(None);

        controller.dispatch(
            &mut doc,
            p,
            EditorEvent::MouseDown { x: 1.0, y: 1.0, shift: true },
            &mut prompt,
        );
        assert!(controller.is_dragging());

        controller.toggle_edit_mode(&mut doc);
        assert!(!controller.is_dragging());
        let response =
            controller.dispatch(&mut doc, p, EditorEvent::MouseMove { x: 50.0, y: 50.0 }, &mut prompt);
        assert!(!response.handled);
    }
}
