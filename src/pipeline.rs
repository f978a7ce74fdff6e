// src/pipeline.rs

use crate::analysis::{
    calculate_investment_metrics, summarize_rents, InvestmentRecord, RentSummaryRow,
};
use crate::geo::{geocode_records, MapView};
use crate::listings::{normalize_rentals, normalize_sales, RentalRecord};
use crate::realtor::{ListingCategory, ListingSource};
use crate::state::AppState;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

/// Everything one search produces.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub location: String,
    pub searched_at: DateTime<Utc>,
    pub rentals: Vec<RentalRecord>,
    pub skipped_rentals: usize,
    pub skipped_sales: usize,
    pub rent_summary: Vec<RentSummaryRow>,
    pub investments: Vec<InvestmentRecord>,
    pub map: MapView<InvestmentRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geocoding {
    Run,
    Skip,
}

/// Runs fetch, normalize, aggregate, join and (optionally) geocode for one
/// location. Never fails: a category whose fetch fails contributes no
/// records, and every later stage copes with empty input.
pub fn run_search(state: &AppState, location: &str, geocoding: Geocoding) -> SearchResults {
    let analysis = &state.config.analysis;
    info!(location, "Search started");

    let rental_payload = fetch_or_empty(state.listings.as_ref(), ListingCategory::ForRent, location);
    let rentals = normalize_rentals(&rental_payload, analysis.rental_policy, &state.detail_rules);
    let rent_summary = summarize_rents(&rentals.records);

    let sale_payload = fetch_or_empty(state.listings.as_ref(), ListingCategory::ForSale, location);
    let sales = normalize_sales(&sale_payload, analysis.sale_policy);

    let investments =
        calculate_investment_metrics(&sales.records, &rent_summary, &analysis.investment_params());

    let map = if geocoding == Geocoding::Run && state.config.geocoding.enabled {
        geocode_records(&investments, state.geocoder.as_ref())
    } else {
        MapView::empty()
    };

    info!(
        location,
        rentals = rentals.records.len(),
        rent_groups = rent_summary.len(),
        sales = sales.records.len(),
        investments = investments.len(),
        mapped = map.points.len(),
        "Search complete"
    );

    SearchResults {
        location: location.to_string(),
        searched_at: Utc::now(),
        rentals: rentals.records,
        skipped_rentals: rentals.skipped,
        skipped_sales: sales.skipped,
        rent_summary,
        investments,
        map,
    }
}

/// A failed fetch is "no data" for that category.
fn fetch_or_empty(source: &dyn ListingSource, category: ListingCategory, location: &str) -> Value {
    match source.search(category, location) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(category = category.as_str(), location, error = %e, "No results for this search");
            Value::Null
        }
    }
}
