//! Long mutation sequences against the bounded history

use styletrend_dom::{parse_html, Document, NodeId};
use styletrend_editor::{CannedPrompt, EditModeController, EditorEvent, EditorOptions};

fn page_with_paragraphs(count: usize) -> String {
    let mut body = String::new();
    for i in 0..count {
        body.push_str(&format!("<p>original {i}</p>"));
    }
    format!("<html><body>{body}</body></html>")
}

fn edit(editor: &mut EditModeController, doc: &mut Document, target: NodeId, html: &str) {
    let mut prompt = CannedPrompt(None);
    editor.dispatch(doc, target, EditorEvent::Focus, &mut prompt);
    editor.dispatch(doc, target, EditorEvent::Input { html: html.to_string() }, &mut prompt);
    editor.dispatch(doc, target, EditorEvent::Blur, &mut prompt);
}

fn setup(paragraphs: usize) -> (Document, EditModeController, Vec<NodeId>) {
    let mut doc = parse_html(&page_with_paragraphs(paragraphs)).unwrap();
    let mut editor = EditModeController::new(EditorOptions::default()).unwrap();
    editor.install(&mut doc).unwrap();
    editor.toggle_edit_mode(&mut doc);
    let ps = doc.query_selector_all(doc.root(), "p").unwrap();
    (doc, editor, ps)
}

#[test]
fn test_undo_n_restores_everything_up_to_limit() {
    for n in [1usize, 7, 25, 50] {
        let (mut doc, mut editor, ps) = setup(5);
        let before = doc.clone();

        for i in 0..n {
            let target = ps[i % ps.len()];
            edit(&mut editor, &mut doc, target, &format!("edit {i}"));
        }
        assert_eq!(editor.history().len(), n);

        for _ in 0..n {
            assert!(editor.undo_last_action(&mut doc));
        }

        for p in &ps {
            assert_eq!(doc.inner_html(*p), before.inner_html(*p), "n = {n}");
        }
        assert!(!editor.undo_last_action(&mut doc));
    }
}

#[test]
fn test_51st_entry_evicts_oldest() {
    let (mut doc, mut editor, ps) = setup(1);
    let p = ps[0];

    for i in 0..51 {
        edit(&mut editor, &mut doc, p, &format!("edit {i}"));
    }
    assert_eq!(editor.history().len(), 50);

    for _ in 0..50 {
        editor.undo_last_action(&mut doc);
    }

    // The first focus captured "original 0"; that entry is gone
    assert_eq!(doc.inner_html(p), "edit 0");
    assert!(editor.history().is_empty());
}

#[test]
fn test_mixed_kinds_unwind_in_reverse() -> anyhow::Result<()> {
    let mut doc = parse_html(
        r#"<html><body><h2>Title</h2><img src="https://x/1.jpg"></body></html>"#,
    )?;
    let mut editor = EditModeController::new(EditorOptions::default())?;
    editor.install(&mut doc)?;
    editor.toggle_edit_mode(&mut doc);

    let h2 = doc
        .find_by_tag(doc.root(), "h2")
        .ok_or_else(|| anyhow::anyhow!("missing h2"))?;
    let img = doc
        .find_by_tag(doc.root(), "img")
        .ok_or_else(|| anyhow::anyhow!("missing img"))?;
    let before = doc.clone();

    edit(&mut editor, &mut doc, h2, "Renamed");
    let mut prompt = CannedPrompt(Some("https://x/2.jpg".to_string()));
    editor.dispatch(&mut doc, img, EditorEvent::DoubleClick, &mut prompt);
    editor.dispatch(&mut doc, img, EditorEvent::MouseDown { x: 0.0, y: 0.0, shift: true }, &mut prompt);
    editor.dispatch(&mut doc, img, EditorEvent::MouseMove { x: 30.0, y: 40.0 }, &mut prompt);
    editor.dispatch(&mut doc, img, EditorEvent::MouseUp, &mut prompt);
    edit(&mut editor, &mut doc, h2, "Renamed again");

    assert_eq!(editor.history().len(), 4);
    while editor.undo_last_action(&mut doc) {}

    assert_eq!(doc.inner_html(h2), before.inner_html(h2));
    assert_eq!(doc.get_attribute(img, "src"), Some("https://x/1.jpg"));
    assert!(!doc.has_attribute(img, "style"));
    Ok(())
}

#[test]
fn test_custom_history_limit() -> anyhow::Result<()> {
    let mut doc = parse_html(&page_with_paragraphs(1))?;
    let options = EditorOptions {
        history_limit: 3,
        ..EditorOptions::default()
    };
    let mut editor = EditModeController::new(options)?;
    editor.toggle_edit_mode(&mut doc);
    let p = doc
        .find_by_tag(doc.root(), "p")
        .ok_or_else(|| anyhow::anyhow!("missing p"))?;

    for i in 0..10 {
        edit(&mut editor, &mut doc, p, &format!("edit {i}"));
    }
    assert_eq!(editor.history().len(), 3);
    Ok(())
}
