use crate::db::listings as persistence;
use crate::db::Database;
use crate::domain::listing::{CarListing, ListingDraft, ListingPatch};
use crate::domain::query::ListingFilters;
use crate::errors::ServerError;
use crate::markdown;
use crate::responses::{html_response, json_response, ResultResp};
use crate::store::ListingStore;
use crate::templates::pages::{
    dashboard_page, detail_page, editor_page, home_page, DashboardVm,
};
use astra::Request;
use maud::PreEscaped;
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;

const PAGE_SIZE: usize = 9;
const HOME_RECENT_HOURS: i64 = 24;

pub fn handle(mut req: Request, db: &Database) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let params = parse_query(&req);

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => home(db),
        ("GET", "/dashboard") => dashboard(db, &params),
        ("GET", "/editor") => html_response(editor_page()),
        ("POST", "/preview") => preview(&mut req),

        ("GET", "/api/listings") => api_list(db, &params),
        ("POST", "/api/listings") => api_create(db, &mut req),
        ("GET", p) if p.starts_with("/api/listings/") => {
            api_detail(db, tail(p, "/api/listings/")?)
        }
        ("PUT", p) if p.starts_with("/api/listings/") => {
            api_update(db, tail(p, "/api/listings/")?, &mut req)
        }
        ("DELETE", p) if p.starts_with("/api/listings/") => {
            api_delete(db, tail(p, "/api/listings/")?)
        }

        ("GET", p) if p.starts_with("/listings/") => listing_detail(db, tail(p, "/listings/")?),

        _ => Err(ServerError::NotFound),
    }
}

// ---------- pages ----------

fn home(db: &Database) -> ResultResp {
    let mut store = ListingStore::new(db.clone());
    store.refresh()?;
    let recent = store.recent_listings(HOME_RECENT_HOURS);
    html_response(home_page(&recent))
}

fn dashboard(db: &Database, params: &HashMap<String, String>) -> ResultResp {
    let mut store = ListingStore::new(db.clone());
    store.refresh()?;

    let query = params.get("q").cloned().unwrap_or_default();
    store.set_search_query(query.clone());
    store.set_filters(filters_from_params(params));

    let page = params
        .get("page")
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1);

    let total = store.filtered_listings().len();
    let listings = store.paginated_listings(page, PAGE_SIZE)?;

    let vm = DashboardVm {
        listings,
        total,
        page,
        page_size: PAGE_SIZE,
        filters: store.filters().clone(),
        query,
        brands: distinct(store.listings(), |l| &l.brand),
        fuel_types: distinct(store.listings(), |l| &l.fuel_type),
        transmission_types: distinct(store.listings(), |l| &l.transmission_type),
    };

    html_response(dashboard_page(&vm))
}

fn listing_detail(db: &Database, id: &str) -> ResultResp {
    // Every detail view counts, like the original site.
    persistence::increment_view_count(db, id)?;

    let mut store = ListingStore::new(db.clone());
    let listing = store.load_detail(id)?.ok_or(ServerError::NotFound)?;
    html_response(detail_page(listing))
}

fn preview(req: &mut Request) -> ResultResp {
    let body = read_body(req)?;
    let fields = parse_pairs(&body);
    let source = fields.get("markdown").map(String::as_str).unwrap_or("");
    html_response(PreEscaped(markdown::render(source)))
}

// ---------- JSON API ----------

fn api_list(db: &Database, params: &HashMap<String, String>) -> ResultResp {
    let mut store = ListingStore::new(db.clone());
    match params.get("seller") {
        Some(seller_uid) if !seller_uid.is_empty() => store.refresh_for_seller(seller_uid)?,
        _ => store.refresh()?,
    }

    json_response(&json!({
        "success": true,
        "listings": store.listings(),
        "total": store.listings().len(),
    }))
}

fn api_detail(db: &Database, id: &str) -> ResultResp {
    let mut store = ListingStore::new(db.clone());
    let listing = store.load_detail(id)?.ok_or(ServerError::NotFound)?;
    json_response(&json!({ "success": true, "listing": listing }))
}

fn api_create(db: &Database, req: &mut Request) -> ResultResp {
    let body = read_body(req)?;
    let draft: ListingDraft = serde_json::from_str(&body)
        .map_err(|e| ServerError::BadRequest(format!("Invalid listing payload: {e}")))?;

    let mut store = ListingStore::new(db.clone());
    let created = store.add_listing(&draft)?;
    json_response(&json!({ "success": true, "listing": created }))
}

fn api_update(db: &Database, id: &str, req: &mut Request) -> ResultResp {
    let body = read_body(req)?;
    let patch: ListingPatch = serde_json::from_str(&body)
        .map_err(|e| ServerError::BadRequest(format!("Invalid patch payload: {e}")))?;

    let mut store = ListingStore::new(db.clone());
    store.update_listing(id, &patch)?;
    json_response(&json!({ "success": true, "id": id }))
}

fn api_delete(db: &Database, id: &str) -> ResultResp {
    let mut store = ListingStore::new(db.clone());
    store.delete_listing(id)?;
    json_response(&json!({ "success": true, "id": id }))
}

// ---------- helpers ----------

fn tail<'a>(path: &'a str, prefix: &str) -> Result<&'a str, ServerError> {
    let rest = &path[prefix.len()..];
    if rest.is_empty() {
        return Err(ServerError::NotFound);
    }
    Ok(rest)
}

fn distinct(listings: &[CarListing], field: impl Fn(&CarListing) -> &str) -> Vec<String> {
    let mut values: Vec<String> = listings.iter().map(|l| field(l).to_string()).collect();
    values.sort();
    values.dedup();
    values
}

fn filters_from_params(params: &HashMap<String, String>) -> ListingFilters {
    let mut filters = ListingFilters::default();

    if let Some(brand) = params.get("brand") {
        if !brand.is_empty() {
            filters.brand = brand.clone();
        }
    }
    if let Some(fuel) = params.get("fuelType") {
        if !fuel.is_empty() {
            filters.fuel_type = fuel.clone();
        }
    }
    if let Some(transmission) = params.get("transmissionType") {
        if !transmission.is_empty() {
            filters.transmission_type = transmission.clone();
        }
    }
    filters.min_year = params.get("minYear").and_then(|v| v.parse().ok());
    filters.max_year = params.get("maxYear").and_then(|v| v.parse().ok());

    filters
}

fn read_body(req: &mut Request) -> Result<String, ServerError> {
    let mut body = String::new();
    req.body_mut()
        .reader()
        .read_to_string(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("Unreadable body: {e}")))?;
    Ok(body)
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    match req.uri().query() {
        Some(q) => parse_pairs(q),
        None => HashMap::new(),
    }
}

/// Split `k=v&k2=v2` pairs, decoding `+` and percent escapes.
fn parse_pairs(raw: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();

    for pair in raw.split('&') {
        let mut parts = pair.splitn(2, '=');
        if let (Some(k), Some(v)) = (parts.next(), parts.next()) {
            map.insert(decode_component(k), decode_component(v));
        }
    }

    map
}

fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match decoded {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}
