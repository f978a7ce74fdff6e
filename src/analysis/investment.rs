// src/analysis/investment.rs

use crate::analysis::RentSummaryRow;
use crate::listings::{numeric, SaleRecord};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Caller-supplied inputs to the metrics. No `Default`: the expense ratio
/// always comes from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentParams {
    /// Share of estimated annual rent spent on operating expenses.
    pub expense_ratio: f64,
    /// Keep only the best `top_n` listings by cap rate.
    pub top_n: Option<usize>,
}

/// A for-sale listing with its rent-based investment metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentRecord {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub listing_price: Option<f64>,
    pub beds: String,
    pub baths: String,
    pub sqft: Option<f64>,
    pub lot_sqft: Option<f64>,
    pub property_type: String,
    pub status: String,
    pub median_rent: Option<f64>,
    pub estimated_annual_rent: Option<f64>,
    pub projected_expenses: Option<f64>,
    pub noi: Option<f64>,
    /// Percentage; `None` unless the price is a positive number and rent data exists.
    pub cap_rate: Option<f64>,
    pub listed_by: String,
    pub primary_image: String,
    pub listing_url: String,
}

/// Joins sales against the rent summary and ranks them by cap rate.
///
/// The join is a left join on exact (property type, beds, baths): a sale with
/// no matching rent group keeps every derived metric as `None`. Missing
/// values propagate through the arithmetic and are never treated as zero.
/// Rows are sorted by cap rate descending with undefined cap rates last; the
/// sort is stable. `top_n` truncation happens after sorting.
pub fn calculate_investment_metrics(
    sales: &[SaleRecord],
    rent_summary: &[RentSummaryRow],
    params: &InvestmentParams,
) -> Vec<InvestmentRecord> {
    let medians: HashMap<(&str, &str, &str), Option<f64>> = rent_summary
        .iter()
        .map(|row| (row.key(), row.median_rent))
        .collect();

    let mut records: Vec<InvestmentRecord> = sales
        .iter()
        .map(|sale| {
            let median_rent = medians
                .get(&(
                    sale.property_type.as_str(),
                    sale.beds.as_str(),
                    sale.baths.as_str(),
                ))
                .copied()
                .flatten();
            investment_record(sale, median_rent, params.expense_ratio)
        })
        .collect();

    records.sort_by(|a, b| by_cap_rate_desc(a.cap_rate, b.cap_rate));

    if let Some(n) = params.top_n {
        records.truncate(n);
    }

    records
}

fn investment_record(
    sale: &SaleRecord,
    median_rent: Option<f64>,
    expense_ratio: f64,
) -> InvestmentRecord {
    let estimated_annual_rent = median_rent.map(|rent| rent * 12.0);
    let projected_expenses = estimated_annual_rent.map(|annual| annual * expense_ratio);
    let noi = match (estimated_annual_rent, projected_expenses) {
        (Some(annual), Some(expenses)) => Some(annual - expenses),
        _ => None,
    };
    let listing_price = finite(sale.price);
    let cap_rate = match (noi, listing_price) {
        (Some(noi), Some(price)) if price > 0.0 => finite(Some(100.0 * noi / price)),
        _ => None,
    };

    InvestmentRecord {
        address: sale.address.clone(),
        city: sale.city.clone(),
        state: sale.state.clone(),
        zip: sale.zip.clone(),
        listing_price,
        beds: sale.beds.clone(),
        baths: sale.baths.clone(),
        sqft: coerce_number(&sale.sqft),
        lot_sqft: coerce_number(&sale.lot_sqft),
        property_type: sale.property_type.clone(),
        status: sale.status.clone(),
        median_rent: finite(median_rent),
        estimated_annual_rent: finite(estimated_annual_rent),
        projected_expenses: finite(projected_expenses),
        noi: finite(noi),
        cap_rate,
        listed_by: sale.listed_by.clone(),
        primary_image: sale.primary_image.clone(),
        listing_url: sale.listing_url.clone(),
    }
}

/// Defined values first (largest first), then undefined ones.
fn by_cap_rate_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Text column to number; anything non-numeric (including "N/A") is missing.
fn coerce_number(text: &str) -> Option<f64> {
    numeric(Some(&Value::String(text.to_string())))
}
