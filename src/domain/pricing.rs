// src/domain/pricing.rs

use crate::domain::listing::{CarListing, PricePoint};

/// First and last price-history entries, if the history is long enough
/// to say anything about a change. A missing, empty, or single-entry
/// history means "no change" for every derived metric.
fn change_window(listing: &CarListing) -> Option<(&PricePoint, &PricePoint)> {
    let history = listing.price_history.as_deref()?;
    if history.len() <= 1 {
        return None;
    }
    Some((history.first()?, history.last()?))
}

pub fn has_price_changed(listing: &CarListing) -> bool {
    match change_window(listing) {
        Some((first, last)) => first.amount != last.amount,
        None => false,
    }
}

pub fn has_price_increased(listing: &CarListing) -> bool {
    match change_window(listing) {
        Some((first, last)) => last.amount > first.amount,
        None => false,
    }
}

pub fn has_price_decreased(listing: &CarListing) -> bool {
    match change_window(listing) {
        Some((first, last)) => last.amount < first.amount,
        None => false,
    }
}

/// Percentage change between the original and current price.
/// Returns 0 for short histories and when the original price is 0,
/// so callers never divide by zero.
pub fn price_change_percentage(listing: &CarListing) -> f64 {
    match change_window(listing) {
        Some((first, last)) => {
            if first.amount == 0.0 {
                return 0.0;
            }
            (last.amount - first.amount) / first.amount * 100.0
        }
        None => 0.0,
    }
}
