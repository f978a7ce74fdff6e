use crate::analysis::InvestmentRecord;
use crate::geo::{Coordinate, Geocoder};
use crate::listings::SaleRecord;
use serde::Serialize;
use tracing::{info, warn};

/// Anything with a postal address the geocoder can look up.
pub trait Locatable {
    fn address_query(&self) -> String;
}

/// `"{address}, {city}, {state} {zip}"`
pub fn address_query(address: &str, city: &str, state: &str, zip: &str) -> String {
    format!("{address}, {city}, {state} {zip}")
}

impl Locatable for InvestmentRecord {
    fn address_query(&self) -> String {
        address_query(&self.address, &self.city, &self.state, &self.zip)
    }
}

impl Locatable for SaleRecord {
    fn address_query(&self) -> String {
        address_query(&self.address, &self.city, &self.state, &self.zip)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodedRecord<T> {
    pub record: T,
    pub coordinate: Coordinate,
}

/// The records that resolved to a coordinate, and where to center a map on
/// them. `center` is `None` when nothing resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView<T> {
    pub points: Vec<GeocodedRecord<T>>,
    pub unresolved: usize,
    pub center: Option<Coordinate>,
}

impl<T> MapView<T> {
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            unresolved: 0,
            center: None,
        }
    }
}

/// Geocodes every record in order, one request at a time. Request pacing
/// belongs to the geocoder, so concurrent batches share one rate limit.
///
/// A record that finds no match or whose lookup errors is left out of the
/// points and the batch carries on.
pub fn geocode_records<T>(
    records: &[T],
    geocoder: &dyn Geocoder,
) -> MapView<T>
where
    T: Locatable + Clone,
{
    let mut points = Vec::new();
    let mut unresolved = 0;

    for record in records {
        let query = record.address_query();

        match geocoder.geocode(&query) {
            Ok(Some(coordinate)) => points.push(GeocodedRecord {
                record: record.clone(),
                coordinate,
            }),
            Ok(None) => {
                warn!(%query, "No geocoding match");
                unresolved += 1;
            }
            Err(e) => {
                warn!(%query, error = %e, "Geocoding failed");
                unresolved += 1;
            }
        }
    }

    let center = map_center(&points);
    info!(resolved = points.len(), unresolved, "Geocoding complete");

    MapView {
        points,
        unresolved,
        center,
    }
}

/// Mean latitude and mean longitude of the points.
pub fn map_center<T>(points: &[GeocodedRecord<T>]) -> Option<Coordinate> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let (lat_sum, lon_sum) = points.iter().fold((0.0, 0.0), |(lat, lon), p| {
        (lat + p.coordinate.latitude, lon + p.coordinate.longitude)
    });

    Some(Coordinate {
        latitude: lat_sum / n,
        longitude: lon_sum / n,
    })
}
