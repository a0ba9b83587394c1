use crate::*;

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Fashion Trend Report</title>
    <style>.cyber-item > img { width: 100%; }</style>
</head>
<body>
    <h1>2025 Trends</h1>
    <div class="cyber-item">
        <img src="https://loremflickr.com/640/480/fashion" alt="look">
        <div class="cyber-overlay"><h3>Neon</h3><p>Glow &amp; chrome</p></div>
    </div>
    <script src="editor.js"></script>
</body>
</html>
"#;

#[test]
fn test_parse_full_page() {
    let doc = parse_html(PAGE).unwrap();

    let html = doc.document_element().unwrap();
    assert_eq!(doc.tag_name(html), Some("html"));
    assert_eq!(doc.get_attribute(html, "lang"), Some("en"));
    assert!(doc.head().is_some());
    assert!(doc.body().is_some());

    let style = doc.find_by_tag(doc.root(), "style").unwrap();
    assert_eq!(doc.text_content(style), ".cyber-item > img { width: 100%; }");
}

#[test]
fn test_page_round_trip() {
    let doc = parse_html(PAGE).unwrap();
    assert_eq!(serialize_document(&doc), PAGE);
}

#[test]
fn test_editable_selector_on_page() {
    let doc = parse_html(PAGE).unwrap();
    let found = doc
        .query_selector_all(doc.root(), "h1, h2, h3, p, img, .cyber-item, .cyber-overlay")
        .unwrap();
    let tags: Vec<_> = found.iter().filter_map(|n| doc.tag_name(*n)).collect();
    assert_eq!(tags, vec!["h1", "div", "img", "div", "h3", "p"]);
}

#[test]
fn test_clone_is_deep() {
    let doc = parse_html(PAGE).unwrap();
    let mut copy = doc.clone();
    let script = copy
        .query_selector(copy.root(), r#"script[src="editor.js"]"#)
        .unwrap()
        .unwrap();
    copy.detach(script);

    assert!(!copy.is_attached(script));
    assert!(doc.is_attached(script));
}

#[test]
fn test_detached_ids_stay_valid_after_inner_html() {
    let mut doc = parse_html(PAGE).unwrap();
    let overlay = doc.query_selector(doc.root(), ".cyber-overlay").unwrap().unwrap();
    let h3 = doc.find_by_tag(overlay, "h3").unwrap();

    doc.set_inner_html(overlay, "<h3>Chrome</h3>").unwrap();

    assert_eq!(doc.text_content(h3), "Neon");
    assert!(!doc.is_attached(h3));
    assert_eq!(doc.text_content(overlay), "Chrome");
}
