use maud::{html, Markup};

use crate::domain::listing::{CarListing, Price};
use crate::domain::pricing;

/// "18.500 EUR" style price text; whole amounts drop the fraction.
pub fn format_price(price: &Price) -> String {
    if price.amount.fract() == 0.0 {
        format!("{:.0} {}", price.amount, price.currency)
    } else {
        format!("{:.2} {}", price.amount, price.currency)
    }
}

/// Epoch millis -> "12 Mar 2024", or a dash when out of range.
pub fn format_date(epoch_ms: i64) -> String {
    match chrono::DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.format("%d %b %Y").to_string(),
        None => "—".to_string(),
    }
}

/// Small badge showing the direction and size of a price change, or
/// nothing when the history is too short to tell.
pub fn price_change_badge(listing: &CarListing) -> Markup {
    let pct = pricing::price_change_percentage(listing);
    html! {
        @if pricing::has_price_decreased(listing) {
            span class="px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-green-100 text-green-800" {
                "↓ " (format!("{:.1}%", pct.abs()))
            }
        } @else if pricing::has_price_increased(listing) {
            span class="px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-red-100 text-red-800" {
                "↑ " (format!("{:.1}%", pct))
            }
        }
    }
}

pub fn status_badge(listing: &CarListing) -> Markup {
    html! {
        span class="px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-gray-100 text-gray-800" {
            (listing.status.as_str())
        }
    }
}

/// One listing card for the home and dashboard grids.
pub fn listing_card(listing: &CarListing) -> Markup {
    html! {
        div class="card" {
            a href=(format!("/listings/{}", listing.id)) {
                @if let Some(url) = &listing.image_url {
                    img src=(url) alt=(listing.title) class="card-image";
                }
                h2 { (listing.title) }
            }
            div class="card-body" {
                p class="text-gray-500" {
                    (listing.brand) " " (listing.model) " · " (listing.year)
                }
                p {
                    @if listing.is_price_hidden {
                        em { "Price on request" }
                    } @else {
                        strong { (format_price(&listing.price)) }
                    }
                    " " (price_change_badge(listing))
                }
                p class="text-xs text-gray-400" {
                    "No. " (listing.listing_no) " · " (format_date(listing.publish_date))
                }
            }
        }
    }
}
