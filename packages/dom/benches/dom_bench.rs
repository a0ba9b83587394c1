use criterion::{black_box, criterion_group, criterion_main, Criterion};
use styletrend_dom::{parse_html, serialize_document};

fn trend_page(items: usize) -> String {
    let mut body = String::new();
    for i in 0..items {
        body.push_str(&format!(
            r#"<div class="cyber-item"><img src="https://loremflickr.com/640/480/fashion?lock={i}" alt="look {i}"><div class="cyber-overlay"><h3>Look {i}</h3><p>Chrome &amp; neon</p></div></div>"#
        ));
    }
    format!("<!DOCTYPE html>\n<html><head><title>Report</title></head><body><h1>Trends</h1>{body}</body></html>")
}

fn parse_page(c: &mut Criterion) {
    let source = trend_page(100);
    c.bench_function("parse_trend_page", |b| {
        b.iter(|| parse_html(black_box(&source)))
    });
}

fn serialize_page(c: &mut Criterion) {
    let doc = parse_html(&trend_page(100)).unwrap();
    c.bench_function("serialize_trend_page", |b| {
        b.iter(|| serialize_document(black_box(&doc)))
    });
}

fn query_editables(c: &mut Criterion) {
    let doc = parse_html(&trend_page(100)).unwrap();
    c.bench_function("query_editables", |b| {
        b.iter(|| {
            doc.query_selector_all(
                doc.root(),
                black_box("h1, h2, h3, p, img, .cyber-item, .cyber-overlay"),
            )
        })
    });
}

criterion_group!(benches, parse_page, serialize_page, query_editables);
criterion_main!(benches);
