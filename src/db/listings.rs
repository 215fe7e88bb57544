use crate::db::connection::Database;
use crate::domain::listing::{
    expiry_date_for, CarListing, ListingDraft, ListingPatch, ListingStatus, PricePoint,
};
use crate::errors::ServerError;
use chrono::Utc;
use rand::Rng;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

/// Width of the externally visible listing number.
const LISTING_NO_DIGITS: usize = 10;

fn decode_doc(doc: String) -> Result<CarListing, ServerError> {
    serde_json::from_str(&doc).map_err(|e| ServerError::DbError(format!("Corrupt listing doc: {e}")))
}

fn encode_doc(listing: &CarListing) -> Result<String, ServerError> {
    serde_json::to_string(listing)
        .map_err(|e| ServerError::DbError(format!("Encode listing doc failed: {e}")))
}

pub fn fetch_all_listings(db: &Database) -> Result<Vec<CarListing>, ServerError> {
    fetch_docs(db, "SELECT doc FROM listings ORDER BY publish_date DESC", &[])
}

pub fn fetch_listings_by_seller(
    db: &Database,
    seller_uid: &str,
) -> Result<Vec<CarListing>, ServerError> {
    fetch_docs(
        db,
        "SELECT doc FROM listings WHERE seller_uid = ?1 ORDER BY publish_date DESC",
        &[seller_uid],
    )
}

fn fetch_docs(
    db: &Database,
    sql: &str,
    args: &[&str],
) -> Result<Vec<CarListing>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map(rusqlite::params_from_iter(args), |row| {
                row.get::<_, String>(0)
            })
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for row in rows {
            let doc = row.map_err(|e| ServerError::DbError(e.to_string()))?;
            out.push(decode_doc(doc)?);
        }
        Ok(out)
    })
}

pub fn fetch_listing_by_id(
    db: &Database,
    id: &str,
) -> Result<Option<CarListing>, ServerError> {
    let doc = db.with_conn(|conn| {
        conn.query_row(
            "SELECT doc FROM listings WHERE id = ?1",
            params![id],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| ServerError::DbError(e.to_string()))
    })?;

    doc.map(decode_doc).transpose()
}

/// Create a listing from a draft, filling in everything the caller does
/// not control: id, listing number, lifecycle dates, counters, status
/// and the first price-history entry.
pub fn create_listing(
    db: &Database,
    draft: &ListingDraft,
    listing_no: &str,
) -> Result<CarListing, ServerError> {
    let now = Utc::now().timestamp_millis();

    let listing = CarListing {
        id: Uuid::new_v4().to_string(),
        listing_no: listing_no.to_string(),

        title: draft.title.clone(),
        description: draft.description.clone(),
        brand: draft.brand.clone(),
        model: draft.model.clone(),
        submodel: draft.submodel.clone(),
        year: draft.year,

        engine_volume: draft.engine_volume.clone(),
        engine_power: draft.engine_power.clone(),
        drive_train: draft.drive_train.clone(),

        images: draft.images.clone(),
        image_url: draft.image_url.clone(),

        status: ListingStatus::Pending,
        rejection_reason: None,

        selected_equipment_features: draft.selected_equipment_features.clone(),

        location: draft.location.clone(),
        mileage: draft.mileage.clone(),

        original_price: draft.original_price.clone(),
        price: draft.price.clone(),
        exchange_price: draft.exchange_price.clone(),
        price_history: Some(vec![PricePoint {
            date: now,
            amount: draft.price.amount,
            currency: draft.price.currency.clone(),
        }]),

        is_price_hidden: draft.is_price_hidden,
        is_negotiable: draft.is_negotiable,
        is_exchange: draft.is_exchange,

        vehicle_type: draft.vehicle_type.clone(),
        transmission_type: draft.transmission_type.clone(),
        fuel_type: draft.fuel_type.clone(),

        color: draft.color.clone(),

        listing_date: now,
        publish_date: now,
        expiry_date: expiry_date_for(&draft.seller.seller_type, now),

        view_count: 0,
        favorite_count: 0,

        seller: draft.seller.clone(),

        remove: None,
    };

    let doc = encode_doc(&listing)?;
    db.with_conn(|conn| {
        conn.execute(
            r#"
            INSERT INTO listings (id, listing_no, seller_uid, status, publish_date, doc)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                listing.id,
                listing.listing_no,
                listing.seller.uid,
                listing.status.as_str(),
                listing.publish_date,
                doc
            ],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(())
    })?;

    Ok(listing)
}

/// Load-merge-store partial update. The projection columns are rewritten
/// from the merged document so they never drift from the JSON.
pub fn update_listing(
    db: &Database,
    id: &str,
    patch: &ListingPatch,
) -> Result<(), ServerError> {
    let mut listing = fetch_listing_by_id(db, id)?.ok_or(ServerError::NotFound)?;
    listing.apply_patch(patch, Utc::now().timestamp_millis());
    store_doc(db, &listing)
}

/// Detail-page view counter bump.
pub fn increment_view_count(db: &Database, id: &str) -> Result<(), ServerError> {
    let mut listing = fetch_listing_by_id(db, id)?.ok_or(ServerError::NotFound)?;
    listing.view_count += 1;
    store_doc(db, &listing)
}

fn store_doc(db: &Database, listing: &CarListing) -> Result<(), ServerError> {
    let doc = encode_doc(listing)?;
    db.with_conn(|conn| {
        conn.execute(
            r#"
            UPDATE listings
            SET status = ?1, publish_date = ?2, seller_uid = ?3, doc = ?4
            WHERE id = ?5
            "#,
            params![
                listing.status.as_str(),
                listing.publish_date,
                listing.seller.uid,
                doc,
                listing.id
            ],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(())
    })
}

pub fn delete_listing(db: &Database, id: &str) -> Result<(), ServerError> {
    let affected = db.with_conn(|conn| {
        conn.execute("DELETE FROM listings WHERE id = ?1", params![id])
            .map_err(|e| ServerError::DbError(e.to_string()))
    })?;

    if affected == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn count_listings(db: &Database) -> Result<i64, ServerError> {
    db.with_conn(|conn| {
        conn.query_row("SELECT COUNT(*) FROM listings", [], |row| row.get(0))
            .map_err(|e| ServerError::DbError(e.to_string()))
    })
}

/// Next sequential listing number, zero-padded to 10 digits.
///
/// When the count is unavailable this falls back to a timestamp+random
/// string reduced to 10 digits. The fallback trades uniqueness for
/// availability: collisions are possible and nothing here detects them.
pub fn generate_listing_no(db: &Database) -> String {
    match count_listings(db) {
        Ok(count) => format!("{:0width$}", count + 1, width = LISTING_NO_DIGITS),
        Err(e) => {
            eprintln!("Listing number generation failed, using fallback: {e}");
            let suffix: u32 = rand::thread_rng().gen_range(0..1000);
            let digits = format!("{}{suffix:03}", Utc::now().timestamp_millis());
            let start = digits.len().saturating_sub(LISTING_NO_DIGITS);
            format!("{:0>width$}", &digits[start..], width = LISTING_NO_DIGITS)
        }
    }
}
