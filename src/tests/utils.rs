use crate::db::connection::{init_db, Database};
use crate::domain::listing::{
    CarListing, Color, ListingDraft, ListingImages, ListingStatus, Location, Mileage, Price,
    PricePoint, Seller,
};
use astra::{Body, Request, Response};
use chrono::Utc;
use std::io::Read;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static DB_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Returns a fresh test database using the production schema.
pub fn make_db() -> Database {
    let path = std::env::temp_dir().join(format!(
        "classifieds_test_{}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        DB_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let db = Database::new(path.to_string_lossy().to_string());
    init_db(&db, "sql/schema.sql").expect("Failed to initialize DB");
    db
}

pub fn empty_images() -> ListingImages {
    ListingImages {
        front: Vec::new(),
        rear: Vec::new(),
        side: Vec::new(),
        interior: Vec::new(),
        engine: Vec::new(),
        console: Vec::new(),
        other: Vec::new(),
    }
}

pub fn sample_seller(uid: &str) -> Seller {
    Seller {
        uid: uid.to_string(),
        name: "Test Seller".to_string(),
        seller_type: "individual".to_string(),
        phone: None,
        location: None,
        member_since: None,
        verified_seller: None,
        badges: None,
        contact_preferences: None,
    }
}

/// A creation payload with sensible defaults; tests override what they
/// care about.
pub fn sample_draft(seller_uid: &str) -> ListingDraft {
    ListingDraft {
        title: "Well-kept Corolla".to_string(),
        description: Some("# A fine car\n\nRuns **great**.".to_string()),
        brand: "Toyota".to_string(),
        model: "Corolla".to_string(),
        submodel: None,
        year: 2019,
        engine_volume: None,
        engine_power: None,
        drive_train: None,
        images: empty_images(),
        image_url: None,
        selected_equipment_features: None,
        location: Location {
            country: "Germany".to_string(),
            city: "Berlin".to_string(),
            district: "Mitte".to_string(),
        },
        mileage: Mileage {
            value: 68_000,
            unit: "km".to_string(),
        },
        original_price: Price {
            amount: 18_500.0,
            currency: "EUR".to_string(),
        },
        price: Price {
            amount: 18_500.0,
            currency: "EUR".to_string(),
        },
        exchange_price: None,
        is_price_hidden: false,
        is_negotiable: true,
        is_exchange: None,
        vehicle_type: "sedan".to_string(),
        transmission_type: "manual".to_string(),
        fuel_type: "petrol".to_string(),
        color: Color {
            code: "#ffffff".to_string(),
            name: "White".to_string(),
        },
        seller: sample_seller(seller_uid),
    }
}

/// A fully-formed listing for pure-function tests that never touch the
/// database.
pub fn sample_listing(seller_uid: &str) -> CarListing {
    let now = Utc::now().timestamp_millis();
    let draft = sample_draft(seller_uid);

    CarListing {
        id: "listing-1".to_string(),
        listing_no: "0000000001".to_string(),
        title: draft.title,
        description: draft.description,
        brand: draft.brand,
        model: draft.model,
        submodel: draft.submodel,
        year: draft.year,
        engine_volume: draft.engine_volume,
        engine_power: draft.engine_power,
        drive_train: draft.drive_train,
        images: draft.images,
        image_url: draft.image_url,
        status: ListingStatus::Active,
        rejection_reason: None,
        selected_equipment_features: draft.selected_equipment_features,
        location: draft.location,
        mileage: draft.mileage,
        original_price: draft.original_price,
        price: draft.price.clone(),
        exchange_price: draft.exchange_price,
        price_history: Some(vec![PricePoint {
            date: now,
            amount: draft.price.amount,
            currency: draft.price.currency,
        }]),
        is_price_hidden: draft.is_price_hidden,
        is_negotiable: draft.is_negotiable,
        is_exchange: draft.is_exchange,
        vehicle_type: draft.vehicle_type,
        transmission_type: draft.transmission_type,
        fuel_type: draft.fuel_type,
        color: draft.color,
        listing_date: now,
        publish_date: now,
        expiry_date: now + 30 * 24 * 60 * 60 * 1000,
        view_count: 0,
        favorite_count: 0,
        seller: draft.seller,
        remove: None,
    }
}

pub fn get(path: &str) -> Request {
    http::Request::builder()
        .method(http::Method::GET)
        .uri(path)
        .body(Body::from(String::new()))
        .unwrap()
}

pub fn request(method: &str, path: &str, body: &str) -> Request {
    http::Request::builder()
        .method(method)
        .uri(path)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn body_string(resp: &mut Response) -> String {
    let mut bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .expect("response body should be readable");
    String::from_utf8(bytes).expect("response body should be utf-8")
}
