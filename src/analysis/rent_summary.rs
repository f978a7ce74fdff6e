// src/analysis/rent_summary.rs

use crate::listings::RentalRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Rent statistics for one (property type, beds, baths) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentSummaryRow {
    pub property_type: String,
    pub beds: String,
    pub baths: String,
    /// Number of rentals in the group with a numeric rent.
    pub count: usize,
    pub min_rent: Option<f64>,
    pub median_rent: Option<f64>,
    pub max_rent: Option<f64>,
}

impl RentSummaryRow {
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.property_type, &self.beds, &self.baths)
    }
}

/// Groups rentals by exact (property type, beds, baths) and summarizes rent.
///
/// `"N/A"` is an ordinary key. Rentals without a numeric rent still form (or
/// join) their group but contribute nothing to the statistics, so a group
/// made only of them has a zero count and no min/median/max. Rows come out
/// ordered by key.
pub fn summarize_rents(rentals: &[RentalRecord]) -> Vec<RentSummaryRow> {
    let mut groups: BTreeMap<(&str, &str, &str), Vec<f64>> = BTreeMap::new();

    for rental in rentals {
        let rents = groups
            .entry((
                rental.property_type.as_str(),
                rental.beds.as_str(),
                rental.baths.as_str(),
            ))
            .or_default();
        if let Some(rent) = rental.rent.filter(|r| r.is_finite()) {
            rents.push(rent);
        }
    }

    groups
        .into_iter()
        .map(|((property_type, beds, baths), mut rents)| {
            rents.sort_by(f64::total_cmp);
            RentSummaryRow {
                property_type: property_type.to_string(),
                beds: beds.to_string(),
                baths: baths.to_string(),
                count: rents.len(),
                min_rent: rents.first().copied(),
                median_rent: median_of_sorted(&rents),
                max_rent: rents.last().copied(),
            }
        })
        .collect()
}

/// Median of values already in ascending order; even lengths average the
/// two middle values.
pub fn median_of_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    if n % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}
