use crate::domain::listing::CarListing;
use crate::domain::query::{ListingFilters, FILTER_ALL};
use crate::templates::{desktop_layout, listing_card};
use maud::{html, Markup};

pub struct DashboardVm {
    /// The current page slice of the filtered view.
    pub listings: Vec<CarListing>,
    /// Size of the whole filtered view, for the pager.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub filters: ListingFilters,
    pub query: String,
    /// Distinct values across all listings, for the filter selects.
    pub brands: Vec<String>,
    pub fuel_types: Vec<String>,
    pub transmission_types: Vec<String>,
}

impl DashboardVm {
    fn page_href(&self, page: usize) -> String {
        let mut params = vec![format!("page={page}")];
        if !self.query.is_empty() {
            params.push(format!("q={}", encode_component(&self.query)));
        }
        if self.filters.brand != FILTER_ALL {
            params.push(format!("brand={}", encode_component(&self.filters.brand)));
        }
        if self.filters.fuel_type != FILTER_ALL {
            params.push(format!(
                "fuelType={}",
                encode_component(&self.filters.fuel_type)
            ));
        }
        if self.filters.transmission_type != FILTER_ALL {
            params.push(format!(
                "transmissionType={}",
                encode_component(&self.filters.transmission_type)
            ));
        }
        if let Some(min_year) = self.filters.min_year {
            params.push(format!("minYear={min_year}"));
        }
        if let Some(max_year) = self.filters.max_year {
            params.push(format!("maxYear={max_year}"));
        }
        format!("/dashboard?{}", params.join("&"))
    }

    fn last_page(&self) -> usize {
        if self.total == 0 {
            1
        } else {
            (self.total + self.page_size - 1) / self.page_size
        }
    }
}

/// Query-string encoding for the pager links; the router's query parser
/// is the inverse.
fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ' ' => out.push('+'),
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => out.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    out.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    out
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    desktop_layout(
        "Dashboard",
        html! {
            main class="container" {
                h1 { "Dashboard" }

                (filter_form(vm))

                p class="text-gray-700" {
                    "Found " strong { (vm.total) } " listings."
                }

                @if vm.listings.is_empty() {
                    p { "No listings match the current filters." }
                } @else {
                    div class="card-grid" {
                        @for listing in &vm.listings {
                            (listing_card(listing))
                        }
                    }
                }

                (pager(vm))
            }
        },
    )
}

fn filter_form(vm: &DashboardVm) -> Markup {
    html! {
        form action="/dashboard" method="get" class="card" {
            div class="flex items-center" style="gap: 10px; flex-wrap: wrap;" {
                input
                    type="search"
                    name="q"
                    placeholder="Search title, brand or model..."
                    value=(vm.query);

                select name="brand" {
                    option value=(FILTER_ALL) selected[vm.filters.brand == FILTER_ALL] { "All brands" }
                    @for brand in &vm.brands {
                        option value=(brand) selected[&vm.filters.brand == brand] { (brand) }
                    }
                }

                select name="fuelType" {
                    option value=(FILTER_ALL) selected[vm.filters.fuel_type == FILTER_ALL] { "All fuel types" }
                    @for fuel in &vm.fuel_types {
                        option value=(fuel) selected[&vm.filters.fuel_type == fuel] { (fuel) }
                    }
                }

                select name="transmissionType" {
                    option value=(FILTER_ALL) selected[vm.filters.transmission_type == FILTER_ALL] { "All transmissions" }
                    @for transmission in &vm.transmission_types {
                        option value=(transmission) selected[&vm.filters.transmission_type == transmission] { (transmission) }
                    }
                }

                input
                    type="number"
                    name="minYear"
                    placeholder="Min year"
                    value=[vm.filters.min_year];
                input
                    type="number"
                    name="maxYear"
                    placeholder="Max year"
                    value=[vm.filters.max_year];

                button type="submit" { "Apply" }
            }
        }
    }
}

fn pager(vm: &DashboardVm) -> Markup {
    let last = vm.last_page();
    html! {
        nav class="flex items-center justify-between" style="margin-top: 1rem;" {
            @if vm.page > 1 {
                a href=(vm.page_href(vm.page - 1)) { "← Previous" }
            } @else {
                span {}
            }

            span class="text-gray-500" { "Page " (vm.page) " of " (last) }

            @if vm.page < last {
                a href=(vm.page_href(vm.page + 1)) { "Next →" }
            } @else {
                span {}
            }
        }
    }
}
