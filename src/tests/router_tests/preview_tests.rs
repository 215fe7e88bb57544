// src/tests/router_tests/preview_tests.rs

use crate::router::handle;
use crate::tests::utils::{body_string, get, make_db, request};

#[test]
fn editor_page_renders_with_initial_preview() {
    let db = make_db();
    let mut resp = handle(get("/editor"), &db).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("textarea"));
    assert!(body.contains("<h1>Markdown Preview</h1>"));
}

#[test]
fn preview_returns_the_rendered_fragment() {
    let db = make_db();
    let mut resp = handle(
        request("POST", "/preview", "markdown=%23+Hello%0A%0A**bold**"),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("<h1>Hello</h1>"));
    assert!(body.contains("<strong>bold</strong>"));
    // A fragment, not a whole page.
    assert!(!body.contains("<html"));
}

#[test]
fn preview_without_a_markdown_field_is_empty_but_ok() {
    let db = make_db();
    let mut resp = handle(request("POST", "/preview", "other=1"), &db).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(!body.contains("<h1>"));
}
