// src/tests/router_tests/detail_tests.rs

use crate::db::listings::{create_listing, fetch_listing_by_id};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, make_db, sample_draft};

#[test]
fn detail_page_renders_listing_and_markdown_description() {
    let db = make_db();
    let mut draft = sample_draft("seller-1");
    draft.description = Some("# Condition\n\nRuns **great**, never crashed.".to_string());
    let created = create_listing(&db, &draft, "0000000001").unwrap();

    let mut resp = handle(get(&format!("/listings/{}", created.id)), &db).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("Well-kept Corolla"));
    assert!(body.contains("0000000001"));
    // The markdown description came out as HTML, not source text.
    assert!(body.contains("<h1>Condition</h1>"));
    assert!(body.contains("<strong>great</strong>"));
    assert!(!body.contains("# Condition"));
}

#[test]
fn every_detail_view_bumps_the_counter() {
    let db = make_db();
    let created = create_listing(&db, &sample_draft("seller-1"), "0000000001").unwrap();

    handle(get(&format!("/listings/{}", created.id)), &db).unwrap();
    handle(get(&format!("/listings/{}", created.id)), &db).unwrap();

    let stored = fetch_listing_by_id(&db, &created.id).unwrap().unwrap();
    assert_eq!(stored.view_count, 2);
}

#[test]
fn hidden_price_is_not_shown() {
    let db = make_db();
    let mut draft = sample_draft("seller-1");
    draft.is_price_hidden = true;
    let created = create_listing(&db, &draft, "0000000001").unwrap();

    let mut resp = handle(get(&format!("/listings/{}", created.id)), &db).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains("Price on request"));
    assert!(!body.contains("18500 EUR"));
}

#[test]
fn unknown_listing_is_not_found() {
    let db = make_db();
    let err = handle(get("/listings/nope"), &db).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}
