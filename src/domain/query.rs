// src/domain/query.rs

use chrono::Utc;

use crate::domain::listing::CarListing;
use crate::errors::ServerError;

/// Wildcard sentinel meaning "do not filter on this attribute".
pub const FILTER_ALL: &str = "all";

/// Dashboard filter criteria. Attribute filters use the `"all"` sentinel,
/// year bounds use `None` for "unbounded".
#[derive(Debug, Clone)]
pub struct ListingFilters {
    pub brand: String,
    pub fuel_type: String,
    pub transmission_type: String,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

impl Default for ListingFilters {
    fn default() -> Self {
        Self {
            brand: FILTER_ALL.to_string(),
            fuel_type: FILTER_ALL.to_string(),
            transmission_type: FILTER_ALL.to_string(),
            min_year: None,
            max_year: None,
        }
    }
}

/// Case-insensitive substring search over title, brand and model.
/// An empty (or all-whitespace) query returns the input unchanged.
pub fn filter_by_search(listings: Vec<CarListing>, query: &str) -> Vec<CarListing> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return listings;
    }

    listings
        .into_iter()
        .filter(|l| {
            l.title.to_lowercase().contains(&q)
                || l.brand.to_lowercase().contains(&q)
                || l.model.to_lowercase().contains(&q)
        })
        .collect()
}

/// Intersection of the independent attribute predicates. Each predicate
/// is skipped when its criterion is the wildcard / unbounded value, so
/// the result is order-independent across predicates.
pub fn filter_by_attributes(
    listings: Vec<CarListing>,
    filters: &ListingFilters,
) -> Vec<CarListing> {
    let mut filtered = listings;

    if filters.brand != FILTER_ALL {
        filtered.retain(|l| l.brand == filters.brand);
    }
    if filters.fuel_type != FILTER_ALL {
        filtered.retain(|l| l.fuel_type == filters.fuel_type);
    }
    if filters.transmission_type != FILTER_ALL {
        filtered.retain(|l| l.transmission_type == filters.transmission_type);
    }
    if let Some(min_year) = filters.min_year {
        filtered.retain(|l| l.year >= min_year);
    }
    if let Some(max_year) = filters.max_year {
        filtered.retain(|l| l.year <= max_year);
    }

    filtered
}

/// Listings published within the last `hours` hours.
pub fn filter_recent(listings: Vec<CarListing>, hours: i64) -> Vec<CarListing> {
    // "now" is captured once so every element sees the same snapshot.
    filter_recent_at(listings, hours, Utc::now().timestamp_millis())
}

fn filter_recent_at(listings: Vec<CarListing>, hours: i64, now_ms: i64) -> Vec<CarListing> {
    let threshold = now_ms - hours * 3_600_000;
    listings
        .into_iter()
        .filter(|l| l.publish_date >= threshold)
        .collect()
}

pub fn filter_by_seller(listings: Vec<CarListing>, seller_uid: &str) -> Vec<CarListing> {
    listings
        .into_iter()
        .filter(|l| l.seller.uid == seller_uid)
        .collect()
}

/// 1-indexed pagination. Out-of-range pages (including page 0) yield an
/// empty result; a zero page size is a caller error.
pub fn paginate(
    listings: Vec<CarListing>,
    page: usize,
    page_size: usize,
) -> Result<Vec<CarListing>, ServerError> {
    if page_size == 0 {
        return Err(ServerError::BadRequest(
            "page size must be at least 1".to_string(),
        ));
    }

    let start = match page.checked_sub(1) {
        Some(p) => p.saturating_mul(page_size),
        None => return Ok(Vec::new()),
    };

    Ok(listings.into_iter().skip(start).take(page_size).collect())
}
