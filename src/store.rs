// src/store.rs
//
// Explicit state container for the listing UI: the fetched listing list
// plus the active filter/search criteria. All derivation is delegated to
// the pure functions in domain::query; all persistence goes through
// db::listings. The container is constructed where it is needed and
// passed around, never held in a global.

use crate::db::connection::Database;
use crate::db::listings as persistence;
use crate::domain::listing::{CarListing, ListingDraft, ListingPatch};
use crate::domain::query::{
    filter_by_attributes, filter_by_search, filter_by_seller, filter_recent, paginate,
    ListingFilters,
};
use crate::errors::ServerError;

pub struct ListingStore {
    db: Database,
    listings: Vec<CarListing>,
    current_listing: Option<CarListing>,
    filters: ListingFilters,
    search_query: String,
}

impl ListingStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            listings: Vec::new(),
            current_listing: None,
            filters: ListingFilters::default(),
            search_query: String::new(),
        }
    }

    /// Replace the held list with every listing in the store.
    pub fn refresh(&mut self) -> Result<(), ServerError> {
        self.listings = persistence::fetch_all_listings(&self.db)?;
        Ok(())
    }

    /// Replace the held list with one seller's listings.
    pub fn refresh_for_seller(&mut self, seller_uid: &str) -> Result<(), ServerError> {
        self.listings = persistence::fetch_listings_by_seller(&self.db, seller_uid)?;
        Ok(())
    }

    /// Fetch one listing for the detail view.
    pub fn load_detail(&mut self, id: &str) -> Result<Option<&CarListing>, ServerError> {
        self.current_listing = persistence::fetch_listing_by_id(&self.db, id)?;
        Ok(self.current_listing.as_ref())
    }

    pub fn current_listing(&self) -> Option<&CarListing> {
        self.current_listing.as_ref()
    }

    /// Create a listing: number generation, persistence, then the local
    /// list so the caller sees the new entry without a refetch.
    pub fn add_listing(&mut self, draft: &ListingDraft) -> Result<CarListing, ServerError> {
        let listing_no = persistence::generate_listing_no(&self.db);
        let created = persistence::create_listing(&self.db, draft, &listing_no)?;
        self.listings.push(created.clone());
        Ok(created)
    }

    pub fn update_listing(&mut self, id: &str, patch: &ListingPatch) -> Result<(), ServerError> {
        persistence::update_listing(&self.db, id, patch)?;
        if let Some(updated) = persistence::fetch_listing_by_id(&self.db, id)? {
            if let Some(held) = self.listings.iter_mut().find(|l| l.id == id) {
                *held = updated;
            }
        }
        Ok(())
    }

    pub fn delete_listing(&mut self, id: &str) -> Result<(), ServerError> {
        persistence::delete_listing(&self.db, id)?;
        self.listings.retain(|l| l.id != id);
        Ok(())
    }

    pub fn listing_by_id(&self, id: &str) -> Option<&CarListing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// The raw held list, in fetch order.
    pub fn listings(&self) -> &[CarListing] {
        &self.listings
    }

    pub fn recent_listings(&self, hours: i64) -> Vec<CarListing> {
        filter_recent(self.listings.clone(), hours)
    }

    pub fn listings_by_seller(&self, seller_uid: &str) -> Vec<CarListing> {
        filter_by_seller(self.listings.clone(), seller_uid)
    }

    pub fn set_filters(&mut self, filters: ListingFilters) {
        self.filters = filters;
    }

    pub fn filters(&self) -> &ListingFilters {
        &self.filters
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// The dashboard view: search first, then the attribute filters.
    pub fn filtered_listings(&self) -> Vec<CarListing> {
        let searched = filter_by_search(self.listings.clone(), &self.search_query);
        filter_by_attributes(searched, &self.filters)
    }

    /// One dashboard page of the filtered view.
    pub fn paginated_listings(
        &self,
        page: usize,
        page_size: usize,
    ) -> Result<Vec<CarListing>, ServerError> {
        paginate(self.filtered_listings(), page, page_size)
    }
}
