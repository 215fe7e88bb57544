// src/domain/listing.rs

use serde::{Deserialize, Serialize};

// CarListing
//  ├── images          (categorized photo lists)
//  ├── location        (country / city / district)
//  ├── mileage         (value + unit)
//  ├── price fields    (current / original / exchange / history)
//  ├── color           (hex code + display name)
//  ├── seller          (identity + contact preferences)
//  └── remove          (who removed it, why, when)

pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Inactive,
    Pending,
    Sold,
    Expired,
    Rejected,
    Removed,
}

impl ListingStatus {
    /// The wire/storage spelling, identical to the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Inactive => "inactive",
            ListingStatus::Pending => "pending",
            ListingStatus::Sold => "sold",
            ListingStatus::Expired => "expired",
            ListingStatus::Rejected => "rejected",
            ListingStatus::Removed => "removed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovedByRole {
    User,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemoveReason {
    Sold,
    UserDeactivated,
    ViolatesRules,
    Other,
}

/// Who removed a listing, why, and when (epoch millis).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveInfo {
    pub by_uid: String,
    pub by_role: RemovedByRole,
    pub reason: RemoveReason,
    pub note: Option<String>,
    pub feedback: Option<String>,
    pub at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    pub currency: String,
}

/// One entry in a listing's price history. Insertion order is
/// chronological: the first entry is the original listed price, the last
/// entry is the current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: i64,
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListingImages {
    pub front: Vec<String>,
    pub rear: Vec<String>,
    pub side: Vec<String>,
    pub interior: Vec<String>,
    pub engine: Vec<String>,
    pub console: Vec<String>,
    pub other: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub city: String,
    pub district: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mileage {
    pub value: i64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFeature {
    pub feature_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPreferences {
    pub allow_direct_phone: bool,
    pub allow_phone_messaging: bool,
    pub allow_website_messaging: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub uid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub seller_type: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub member_since: Option<String>,
    pub verified_seller: Option<bool>,
    pub badges: Option<Vec<String>>,
    pub contact_preferences: Option<ContactPreferences>,
}

/// A single vehicle-for-sale record. All timestamps are epoch millis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarListing {
    pub id: String,
    pub listing_no: String,

    pub title: String,
    pub description: Option<String>,
    pub brand: String,
    pub model: String,
    pub submodel: Option<String>,
    pub year: i32,

    pub engine_volume: Option<String>,
    pub engine_power: Option<String>,
    pub drive_train: Option<String>,

    pub images: ListingImages,
    pub image_url: Option<String>,

    pub status: ListingStatus,
    pub rejection_reason: Option<String>,

    pub selected_equipment_features: Option<Vec<SelectedFeature>>,

    pub location: Location,
    pub mileage: Mileage,

    pub original_price: Price,
    pub price: Price,
    pub exchange_price: Option<Price>,
    pub price_history: Option<Vec<PricePoint>>,

    pub is_price_hidden: bool,
    pub is_negotiable: bool,
    pub is_exchange: Option<bool>,

    pub vehicle_type: String,
    pub transmission_type: String,
    pub fuel_type: String,

    pub color: Color,

    pub listing_date: i64,
    pub publish_date: i64,
    pub expiry_date: i64,

    pub view_count: i64,
    pub favorite_count: i64,

    pub seller: Seller,

    pub remove: Option<RemoveInfo>,
}

/// Caller-supplied payload for creating a listing. Everything generated
/// at creation time (id, listing number, dates, counters, status, price
/// history, removal record) is deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    pub description: Option<String>,
    pub brand: String,
    pub model: String,
    pub submodel: Option<String>,
    pub year: i32,

    pub engine_volume: Option<String>,
    pub engine_power: Option<String>,
    pub drive_train: Option<String>,

    pub images: ListingImages,
    pub image_url: Option<String>,

    pub selected_equipment_features: Option<Vec<SelectedFeature>>,

    pub location: Location,
    pub mileage: Mileage,

    pub original_price: Price,
    pub price: Price,
    pub exchange_price: Option<Price>,

    pub is_price_hidden: bool,
    pub is_negotiable: bool,
    pub is_exchange: Option<bool>,

    pub vehicle_type: String,
    pub transmission_type: String,
    pub fuel_type: String,

    pub color: Color,

    pub seller: Seller,
}

/// Partial update for an existing listing. Absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub status: Option<ListingStatus>,
    pub is_price_hidden: Option<bool>,
    pub is_negotiable: Option<bool>,
    pub remove: Option<RemoveInfo>,
}

impl CarListing {
    /// Merge a partial update into the listing. A changed price amount
    /// appends a history entry stamped `now_ms`, keeping the invariant
    /// that the last history entry is the current price.
    pub fn apply_patch(&mut self, patch: &ListingPatch, now_ms: i64) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(price) = &patch.price {
            if price.amount != self.price.amount {
                self.price_history
                    .get_or_insert_with(Vec::new)
                    .push(PricePoint {
                        date: now_ms,
                        amount: price.amount,
                        currency: price.currency.clone(),
                    });
            }
            self.price = price.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(hidden) = patch.is_price_hidden {
            self.is_price_hidden = hidden;
        }
        if let Some(negotiable) = patch.is_negotiable {
            self.is_negotiable = negotiable;
        }
        if let Some(remove) = &patch.remove {
            self.remove = Some(remove.clone());
        }
    }
}

/// How long a fresh listing stays up before expiring, by seller type.
/// Corporate sellers get a longer window, admins the longest.
pub fn expiry_date_for(seller_type: &str, now_ms: i64) -> i64 {
    let days = match seller_type {
        "corporate" => 60,
        "admin" => 90,
        _ => 30,
    };
    now_ms + days * MS_PER_DAY
}
