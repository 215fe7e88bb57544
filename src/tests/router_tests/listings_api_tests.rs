// src/tests/router_tests/listings_api_tests.rs

use crate::db::listings::fetch_listing_by_id;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, make_db, request, sample_draft};
use serde_json::Value;

fn create_via_api(db: &crate::db::Database) -> Value {
    let draft = sample_draft("seller-1");
    let payload = serde_json::to_string(&draft).unwrap();

    let mut resp = handle(request("POST", "/api/listings", &payload), db).unwrap();
    assert_eq!(resp.status(), 200);

    serde_json::from_str(&body_string(&mut resp)).unwrap()
}

#[test]
fn create_persists_a_fetchable_document() {
    let db = make_db();
    let created = create_via_api(&db);

    assert_eq!(created["success"], true);
    let id = created["listing"]["id"].as_str().unwrap();
    let listing_no = created["listing"]["listingNo"].as_str().unwrap();

    assert_eq!(listing_no.len(), 10);
    assert!(listing_no.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(created["listing"]["status"], "pending");

    let stored = fetch_listing_by_id(&db, id).unwrap().unwrap();
    assert_eq!(stored.title, "Well-kept Corolla");
}

#[test]
fn list_and_seller_filter() {
    let db = make_db();
    create_via_api(&db);

    let other = sample_draft("seller-2");
    let payload = serde_json::to_string(&other).unwrap();
    handle(request("POST", "/api/listings", &payload), &db).unwrap();

    let mut resp = handle(get("/api/listings"), &db).unwrap();
    let all: Value = serde_json::from_str(&body_string(&mut resp)).unwrap();
    assert_eq!(all["total"], 2);

    let mut resp = handle(get("/api/listings?seller=seller-2"), &db).unwrap();
    let mine: Value = serde_json::from_str(&body_string(&mut resp)).unwrap();
    assert_eq!(mine["total"], 1);
    assert_eq!(mine["listings"][0]["seller"]["uid"], "seller-2");
}

#[test]
fn detail_returns_the_full_document() {
    let db = make_db();
    let created = create_via_api(&db);
    let id = created["listing"]["id"].as_str().unwrap();

    let mut resp = handle(get(&format!("/api/listings/{id}")), &db).unwrap();
    let detail: Value = serde_json::from_str(&body_string(&mut resp)).unwrap();

    assert_eq!(detail["listing"]["id"], created["listing"]["id"]);
    assert_eq!(detail["listing"]["priceHistory"].as_array().unwrap().len(), 1);
}

#[test]
fn unknown_detail_is_not_found() {
    let db = make_db();
    let err = handle(get("/api/listings/nope"), &db).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn price_update_appends_history() {
    let db = make_db();
    let created = create_via_api(&db);
    let id = created["listing"]["id"].as_str().unwrap().to_string();

    let patch = r#"{"price": {"amount": 17000.0, "currency": "EUR"}}"#;
    let mut resp = handle(request("PUT", &format!("/api/listings/{id}"), patch), &db).unwrap();
    assert_eq!(resp.status(), 200);
    let _ = body_string(&mut resp);

    let stored = fetch_listing_by_id(&db, &id).unwrap().unwrap();
    assert_eq!(stored.price.amount, 17000.0);
    assert_eq!(stored.price_history.unwrap().len(), 2);
}

#[test]
fn malformed_create_payload_is_a_bad_request() {
    let db = make_db();
    let err = handle(request("POST", "/api/listings", "{not json"), &db).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn delete_then_fetch_is_not_found() {
    let db = make_db();
    let created = create_via_api(&db);
    let id = created["listing"]["id"].as_str().unwrap().to_string();

    let resp = handle(request("DELETE", &format!("/api/listings/{id}"), ""), &db).unwrap();
    assert_eq!(resp.status(), 200);

    assert!(fetch_listing_by_id(&db, &id).unwrap().is_none());
    let err = handle(get(&format!("/api/listings/{id}")), &db).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}
