// src/listings/normalize.rs

use crate::format::group_thousands;
use crate::listings::raw::{numeric, text_in};
use crate::listings::records::{listing_url, RENTAL_URL_BASE, SALE_URL_BASE};
use crate::listings::{
    derive_status, DetailRules, RawListing, RentalRecord, SaleRecord, NA, RENTAL_STATUS_FLAGS,
    SALE_STATUS_FLAGS,
};
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

/// What the normalizer does with a listing whose structure is malformed
/// (an entry, `location`, `location.address` or `description` that is not
/// a JSON object).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPolicy {
    /// Drop the whole listing and log it.
    SkipRecord,
    /// Keep the listing; every affected field becomes `"N/A"`.
    DefaultField,
}

impl ExtractionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionPolicy::SkipRecord => "skip",
            ExtractionPolicy::DefaultField => "default",
        }
    }
}

impl FromStr for ExtractionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(ExtractionPolicy::SkipRecord),
            "default" => Ok(ExtractionPolicy::DefaultField),
            other => Err(format!("unknown extraction policy '{other}' (expected skip|default)")),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("listing entry is not a JSON object")]
    NotAnObject,
    #[error("field `{field}` should be an object, found {found}")]
    UnexpectedShape { field: String, found: &'static str },
}

/// Normalizer output: one record per accepted entry plus the number skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

const NO_PET_INFO: &str = "No information";

const PET_LABELS: [(&str, &str); 3] = [
    ("cats", "Cats"),
    ("dogs_small", "Small Dogs"),
    ("dogs_large", "Large Dogs"),
];

pub fn normalize_rentals(
    payload: &Value,
    policy: ExtractionPolicy,
    rules: &DetailRules,
) -> Normalized<RentalRecord> {
    normalize_with(payload, "rental", |prop| rental_record(prop, policy, rules))
}

pub fn normalize_sales(payload: &Value, policy: ExtractionPolicy) -> Normalized<SaleRecord> {
    normalize_with(payload, "sale", |prop| sale_record(prop, policy))
}

fn normalize_with<T, F>(payload: &Value, category: &str, mut extract: F) -> Normalized<T>
where
    F: FnMut(RawListing<'_>) -> Result<T, NormalizeError>,
{
    let entries: &[Value] = match payload.get("properties").and_then(Value::as_array) {
        Some(entries) => entries.as_slice(),
        None => {
            warn!(category, "No properties found or invalid data");
            &[]
        }
    };

    let mut out = Normalized {
        records: Vec::with_capacity(entries.len()),
        skipped: 0,
    };

    for (index, entry) in entries.iter().enumerate() {
        match extract(RawListing::new(entry)) {
            Ok(record) => out.records.push(record),
            Err(e) => {
                warn!(category, index, error = %e, "Skipping listing");
                out.skipped += 1;
            }
        }
    }

    info!(
        category,
        received = entries.len(),
        normalized = out.records.len(),
        skipped = out.skipped,
        "Listings normalized"
    );

    out
}

fn rental_record(
    prop: RawListing<'_>,
    policy: ExtractionPolicy,
    rules: &DetailRules,
) -> Result<RentalRecord, NormalizeError> {
    require_object(prop, policy)?;

    let address = address_of(prop, policy)?;
    let description = prop.section("description", policy)?;
    let details = prop.list("details");
    let rent_value = prop.get("list_price");

    Ok(RentalRecord {
        address: text_in(address, "line"),
        city: text_in(address, "city"),
        state: text_in(address, "state_code"),
        zip: text_in(address, "postal_code"),

        rent: numeric(rent_value),
        formatted_rent: formatted_rent(rent_value),

        beds: text_in(description, "beds"),
        baths: text_in(description, "baths_consolidated"),
        sqft: text_in(description, "sqft"),
        property_type: text_in(description, "type"),
        sub_type: text_in(description, "sub_type"),

        status: derive_status(prop.object("flags"), RENTAL_STATUS_FLAGS),

        security_deposit: rules
            .security_deposit
            .scan(details)
            .unwrap_or_else(|| NA.to_string()),
        available_from: rules
            .availability_date
            .scan(details)
            .unwrap_or_else(|| NA.to_string()),
        pets_allowed: pets_allowed(prop.object("pet_policy")),

        listing_id: prop.text("listing_id"),
        property_id: prop.text("property_id"),
        list_date: prop.text("list_date"),

        contact_phone: management_phone(prop.list("advertisers")),
        primary_image: text_in(prop.object("primary_photo"), "href"),
        additional_photos: additional_photos(prop.list("photos")),
        virtual_tour: text_in(prop.first("virtual_tours"), "href"),
        listing_url: listing_url(RENTAL_URL_BASE, &prop.text("permalink")),
    })
}

fn sale_record(
    prop: RawListing<'_>,
    policy: ExtractionPolicy,
) -> Result<SaleRecord, NormalizeError> {
    require_object(prop, policy)?;

    let address = address_of(prop, policy)?;
    let description = prop.section("description", policy)?;

    Ok(SaleRecord {
        address: text_in(address, "line"),
        city: text_in(address, "city"),
        state: text_in(address, "state_code"),
        zip: text_in(address, "postal_code"),

        price: prop.number("list_price"),

        beds: text_in(description, "beds"),
        baths: text_in(description, "baths_consolidated"),
        sqft: text_in(description, "sqft"),
        lot_sqft: text_in(description, "lot_sqft"),
        property_type: text_in(description, "type"),

        status: derive_status(prop.object("flags"), SALE_STATUS_FLAGS),

        listing_id: prop.text("listing_id"),
        property_id: prop.text("property_id"),
        list_date: prop.text("list_date"),

        primary_image: text_in(prop.object("primary_photo"), "href"),
        additional_photos: additional_photos(prop.list("photos")),
        virtual_tour: text_in(prop.first("virtual_tours"), "href"),
        listed_by: text_in(prop.first("branding"), "name"),
        listing_url: listing_url(SALE_URL_BASE, &prop.text("permalink")),
    })
}

fn require_object(prop: RawListing<'_>, policy: ExtractionPolicy) -> Result<(), NormalizeError> {
    if prop.is_object() || policy == ExtractionPolicy::DefaultField {
        Ok(())
    } else {
        Err(NormalizeError::NotAnObject)
    }
}

fn address_of<'a>(
    prop: RawListing<'a>,
    policy: ExtractionPolicy,
) -> Result<Option<RawListing<'a>>, NormalizeError> {
    match prop.section("location", policy)? {
        Some(location) => location.section("address", policy),
        None => Ok(None),
    }
}

fn formatted_rent(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(rent) => format!("${}", group_thousands(rent)),
            None => format!("${n}"),
        },
        Some(Value::String(s)) => format!("${s}"),
        _ => NA.to_string(),
    }
}

fn pets_allowed(policy: Option<RawListing<'_>>) -> String {
    let allowed: Vec<&str> = match policy {
        Some(policy) => PET_LABELS
            .iter()
            .filter(|(key, _)| policy.flag(key))
            .map(|(_, label)| *label)
            .collect(),
        None => Vec::new(),
    };

    if allowed.is_empty() {
        NO_PET_INFO.to_string()
    } else {
        allowed.join(", ")
    }
}

/// Phone of the first management advertiser whose office lists any phone.
fn management_phone(advertisers: &[Value]) -> String {
    for advertiser in advertisers.iter().map(RawListing::new) {
        if advertiser.get("type").and_then(Value::as_str) != Some("management") {
            continue;
        }
        let Some(office) = advertiser.object("office") else {
            continue;
        };
        if let Some(phone) = office.list("phones").first() {
            return RawListing::new(phone).text("number");
        }
    }

    NA.to_string()
}

fn additional_photos(photos: &[Value]) -> u32 {
    u32::try_from(photos.len().saturating_sub(1)).unwrap_or(u32::MAX)
}
