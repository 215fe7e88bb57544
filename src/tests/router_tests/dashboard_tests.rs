// src/tests/router_tests/dashboard_tests.rs

use crate::db::listings::create_listing;
use crate::db::Database;
use crate::router::handle;
use crate::tests::utils::{body_string, get, make_db, sample_draft};

/// Three listings with distinct brands/fuels/years.
fn seed(db: &Database) {
    let mut corolla = sample_draft("seller-1");
    corolla.title = "Tidy Corolla".to_string();
    corolla.brand = "Toyota".to_string();
    corolla.year = 2018;
    create_listing(db, &corolla, "0000000001").unwrap();

    let mut passat = sample_draft("seller-2");
    passat.title = "Family Passat".to_string();
    passat.brand = "Volkswagen".to_string();
    passat.model = "Passat".to_string();
    passat.fuel_type = "diesel".to_string();
    passat.year = 2015;
    create_listing(db, &passat, "0000000002").unwrap();

    let mut clio = sample_draft("seller-1");
    clio.title = "City Clio".to_string();
    clio.brand = "Renault".to_string();
    clio.model = "Clio".to_string();
    clio.year = 2021;
    create_listing(db, &clio, "0000000003").unwrap();
}

#[test]
fn home_shows_recently_published_listings() {
    let db = make_db();
    seed(&db);

    let mut resp = handle(get("/"), &db).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    // All three were just created, so they fall in the 24h window.
    assert!(body.contains("Tidy Corolla"));
    assert!(body.contains("Family Passat"));
    assert!(body.contains("City Clio"));
}

#[test]
fn dashboard_lists_everything_without_filters() {
    let db = make_db();
    seed(&db);

    let mut resp = handle(get("/dashboard"), &db).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("Tidy Corolla"));
    assert!(body.contains("Family Passat"));
    assert!(body.contains("City Clio"));
    assert!(body.contains("<strong>3</strong>"));
}

#[test]
fn dashboard_brand_filter_narrows_the_list() {
    let db = make_db();
    seed(&db);

    let mut resp = handle(get("/dashboard?brand=Toyota"), &db).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains("Tidy Corolla"));
    assert!(!body.contains("Family Passat"));
    assert!(!body.contains("City Clio"));
}

#[test]
fn dashboard_search_matches_model_case_insensitively() {
    let db = make_db();
    seed(&db);

    let mut resp = handle(get("/dashboard?q=PASSAT"), &db).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains("Family Passat"));
    assert!(!body.contains("Tidy Corolla"));
}

#[test]
fn dashboard_year_bounds_are_inclusive() {
    let db = make_db();
    seed(&db);

    let mut resp = handle(get("/dashboard?minYear=2015&maxYear=2018"), &db).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains("Tidy Corolla"));
    assert!(body.contains("Family Passat"));
    assert!(!body.contains("City Clio"));
}

#[test]
fn dashboard_fuel_and_search_intersect() {
    let db = make_db();
    seed(&db);

    let mut resp = handle(get("/dashboard?fuelType=diesel&q=corolla"), &db).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains("No listings match"));
}

#[test]
fn out_of_range_page_is_empty_not_an_error() {
    let db = make_db();
    seed(&db);

    let mut resp = handle(get("/dashboard?page=99"), &db).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("No listings match"));
}

#[test]
fn empty_database_dashboard_still_renders() {
    let db = make_db();

    let mut resp = handle(get("/dashboard"), &db).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp).contains("<strong>0</strong>"));
}
