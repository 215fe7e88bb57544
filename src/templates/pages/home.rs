// templates/pages/home.rs

use crate::domain::listing::CarListing;
use crate::templates::{desktop_layout, listing_card};
use maud::{html, Markup};

pub fn home_page(recent: &[CarListing]) -> Markup {
    desktop_layout(
        "Home",
        html! {
            main class="container" {
                h1 { "Latest listings" }
                p class="text-gray-600" { "Cars published in the last 24 hours." }

                @if recent.is_empty() {
                    p { "Nothing new right now. " a href="/dashboard" { "Browse all listings" } "." }
                } @else {
                    div class="card-grid" {
                        @for listing in recent {
                            (listing_card(listing))
                        }
                    }
                }

                p {
                    a href="/dashboard" { "Go to the dashboard for search and filters →" }
                }
            }
        },
    )
}
