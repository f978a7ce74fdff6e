use crate::analysis::RentSummaryRow;
use crate::config::AppConfig;
use crate::geo::{Coordinate, GeocodeError, Geocoder};
use crate::listings::{RentalRecord, SaleRecord, NA};
use crate::realtor::{ListingCategory, ListingSource, RealtorError};
use crate::state::AppState;
use astra::{Body, Request, Response};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const RENTALS_JSON: &str = include_str!("fixtures/rentals.json");
pub const SALES_JSON: &str = include_str!("fixtures/sales.json");

fn na() -> String {
    NA.to_string()
}

/// A rental with only the grouping fields and rent filled in.
pub fn rental(property_type: &str, beds: &str, baths: &str, rent: Option<f64>) -> RentalRecord {
    RentalRecord {
        address: "100 Test St".into(),
        city: "Kirkwood".into(),
        state: "MO".into(),
        zip: "63122".into(),
        rent,
        formatted_rent: na(),
        beds: beds.into(),
        baths: baths.into(),
        sqft: na(),
        property_type: property_type.into(),
        sub_type: na(),
        status: "ACTIVE".into(),
        security_deposit: na(),
        available_from: na(),
        pets_allowed: "No information".into(),
        listing_id: na(),
        property_id: na(),
        list_date: na(),
        contact_phone: na(),
        primary_image: na(),
        additional_photos: 0,
        virtual_tour: na(),
        listing_url: na(),
    }
}

/// A sale in Kirkwood, MO 63122 with the grouping fields and price filled in.
pub fn sale(property_type: &str, beds: &str, baths: &str, price: Option<f64>) -> SaleRecord {
    SaleRecord {
        address: "200 Test Ave".into(),
        city: "Kirkwood".into(),
        state: "MO".into(),
        zip: "63122".into(),
        price,
        beds: beds.into(),
        baths: baths.into(),
        sqft: "1500".into(),
        lot_sqft: na(),
        property_type: property_type.into(),
        status: "ACTIVE".into(),
        listing_id: na(),
        property_id: na(),
        list_date: na(),
        primary_image: na(),
        additional_photos: 0,
        virtual_tour: na(),
        listed_by: na(),
        listing_url: na(),
    }
}

/// A one-rental summary group with `median` as min, median and max.
pub fn summary_row(
    property_type: &str,
    beds: &str,
    baths: &str,
    median: Option<f64>,
) -> RentSummaryRow {
    RentSummaryRow {
        property_type: property_type.into(),
        beds: beds.into(),
        baths: baths.into(),
        count: usize::from(median.is_some()),
        min_rent: median,
        median_rent: median,
        max_rent: median,
    }
}

/// In-memory listing source. A category without a payload answers like the
/// API does for an exhausted key: HTTP 403.
#[derive(Default)]
pub struct FixtureSource {
    pub rentals: Option<Value>,
    pub sales: Option<Value>,
}

impl FixtureSource {
    pub fn from_fixtures() -> Self {
        Self {
            rentals: serde_json::from_str(RENTALS_JSON).ok(),
            sales: serde_json::from_str(SALES_JSON).ok(),
        }
    }
}

impl ListingSource for FixtureSource {
    fn search(&self, category: ListingCategory, _location: &str) -> Result<Value, RealtorError> {
        let payload = match category {
            ListingCategory::ForRent => &self.rentals,
            ListingCategory::ForSale => &self.sales,
        };
        payload.clone().ok_or_else(|| RealtorError::Status {
            status: 403,
            body: r#"{"message":"You are not subscribed to this API."}"#.into(),
        })
    }
}

/// In-memory geocoder: known queries resolve, `failing` queries error,
/// everything else finds no match.
#[derive(Default)]
pub struct FixtureGeocoder {
    known: HashMap<String, Coordinate>,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl FixtureGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, latitude: f64, longitude: f64) -> Self {
        self.known.insert(
            query.to_string(),
            Coordinate {
                latitude,
                longitude,
            },
        );
        self
    }

    pub fn failing(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for FixtureGeocoder {
    fn geocode(&self, query: &str) -> Result<Option<Coordinate>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(query) {
            return Err(GeocodeError::Status(503));
        }
        Ok(self.known.get(query).copied())
    }
}

pub fn test_config(overrides: &[(&str, &str)]) -> AppConfig {
    let mut vars: HashMap<String, String> = [
        ("REALTOR_API_KEY", "test-key"),
        ("EXPENSE_RATIO", "0.5"),
        ("GEOCODE_MIN_INTERVAL_MS", "1"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in overrides {
        vars.insert(k.to_string(), v.to_string());
    }
    AppConfig::from_map(&vars).unwrap_or_else(|e| panic!("test config invalid: {e}"))
}

pub fn test_state(listings: FixtureSource, geocoder: FixtureGeocoder) -> AppState {
    AppState::new(test_config(&[]), Box::new(listings), Box::new(geocoder))
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn body_bytes(mut resp: Response) -> Vec<u8> {
    let mut bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .unwrap();
    bytes
}

pub fn body_string(resp: Response) -> String {
    String::from_utf8(body_bytes(resp)).unwrap()
}
