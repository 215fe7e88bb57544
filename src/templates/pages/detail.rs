use crate::domain::listing::CarListing;
use crate::domain::pricing;
use crate::markdown;
use crate::templates::components::{format_date, format_price, price_change_badge, status_badge};
use crate::templates::desktop_layout;
use maud::{html, Markup, PreEscaped};

pub fn detail_page(listing: &CarListing) -> Markup {
    desktop_layout(
        &listing.title,
        html! {
            main class="container" {
                h1 { (listing.title) }
                p class="text-gray-500" {
                    "Listing No. " (listing.listing_no)
                    " · " (status_badge(listing))
                    " · published " (format_date(listing.publish_date))
                    " · expires " (format_date(listing.expiry_date))
                }

                @if let Some(url) = &listing.image_url {
                    img src=(url) alt=(listing.title) class="detail-image";
                }

                section class="card" {
                    h3 { "Price" }
                    @if listing.is_price_hidden {
                        p { em { "Price on request" } }
                    } @else {
                        p {
                            strong { (format_price(&listing.price)) }
                            " " (price_change_badge(listing))
                            @if listing.is_negotiable {
                                " " span class="text-xs" { "(negotiable)" }
                            }
                        }
                        @if let Some(exchange) = &listing.exchange_price {
                            p { "Exchange price: " (format_price(exchange)) }
                        }
                        (price_history_table(listing))
                    }
                }

                section class="card" {
                    h3 { "Specs" }
                    table {
                        tbody {
                            tr { th { "Brand" }        td { (listing.brand) } }
                            tr { th { "Model" }        td { (listing.model) } }
                            @if let Some(submodel) = &listing.submodel {
                                tr { th { "Submodel" } td { (submodel) } }
                            }
                            tr { th { "Year" }         td { (listing.year) } }
                            tr { th { "Vehicle type" } td { (listing.vehicle_type) } }
                            tr { th { "Fuel" }         td { (listing.fuel_type) } }
                            tr { th { "Transmission" } td { (listing.transmission_type) } }
                            tr { th { "Mileage" }      td { (listing.mileage.value) " " (listing.mileage.unit) } }
                            tr { th { "Color" }        td { (listing.color.name) } }
                            @if let Some(volume) = &listing.engine_volume {
                                tr { th { "Engine volume" } td { (volume) } }
                            }
                            @if let Some(power) = &listing.engine_power {
                                tr { th { "Engine power" } td { (power) } }
                            }
                            tr {
                                th { "Location" }
                                td { (listing.location.district) ", " (listing.location.city) ", " (listing.location.country) }
                            }
                        }
                    }
                }

                @if let Some(description) = &listing.description {
                    section class="card" {
                        h3 { "Description" }
                        // Rendered markdown, injected as-is.
                        div class="prose" {
                            (PreEscaped(markdown::render(description)))
                        }
                    }
                }

                section class="card" {
                    h3 { "Seller" }
                    p {
                        strong { (listing.seller.name) }
                        " (" (listing.seller.seller_type) ")"
                        @if listing.seller.verified_seller == Some(true) {
                            " ✓"
                        }
                    }
                    @if let Some(phone) = &listing.seller.phone {
                        p { "Phone: " (phone) }
                    }
                    @if let Some(location) = &listing.seller.location {
                        p { "Location: " (location) }
                    }
                }

                p class="text-gray-400 text-xs" {
                    (listing.view_count) " views · " (listing.favorite_count) " favorites"
                }
            }
        },
    )
}

fn price_history_table(listing: &CarListing) -> Markup {
    let history = listing.price_history.as_deref().unwrap_or(&[]);
    html! {
        @if history.len() > 1 {
            h4 { "Price history" }
            table {
                thead {
                    tr {
                        th { "Date" }
                        th { "Price" }
                    }
                }
                tbody {
                    @for point in history {
                        tr {
                            td { (format_date(point.date)) }
                            td { (format!("{:.0} {}", point.amount, point.currency)) }
                        }
                    }
                }
            }
            @if pricing::has_price_changed(listing) {
                p class="text-gray-500" {
                    "Changed " (format!("{:+.1}%", pricing::price_change_percentage(listing)))
                    " since first listed."
                }
            }
        }
    }
}
