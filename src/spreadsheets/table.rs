use crate::analysis::{InvestmentRecord, RentSummaryRow};

/// One exported cell, typed so each format can write it natively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(Option<f64>),
    Count(usize),
}

impl Cell<'_> {
    /// Raw value for CSV: plain numbers, empty for missing, no currency signs.
    pub fn csv_field(&self) -> String {
        match self {
            Cell::Text(s) => s.to_string(),
            Cell::Number(Some(v)) if v.is_finite() => v.to_string(),
            Cell::Number(_) => String::new(),
            Cell::Count(n) => n.to_string(),
        }
    }
}

/// A record that can be written as one row of a downloadable table.
pub trait ExportRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<Cell<'_>>;
}

impl ExportRow for RentSummaryRow {
    const HEADERS: &'static [&'static str] = &[
        "Property Type",
        "Beds",
        "Baths",
        "Count",
        "Min Rent",
        "Median Rent",
        "Max Rent",
    ];

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(&self.property_type),
            Cell::Text(&self.beds),
            Cell::Text(&self.baths),
            Cell::Count(self.count),
            Cell::Number(self.min_rent),
            Cell::Number(self.median_rent),
            Cell::Number(self.max_rent),
        ]
    }
}

impl ExportRow for InvestmentRecord {
    const HEADERS: &'static [&'static str] = &[
        "Address",
        "City",
        "State",
        "Zip",
        "Listing Price",
        "Beds",
        "Baths",
        "Sq Ft",
        "Lot Size (sq ft)",
        "Property Type",
        "Status",
        "Median Rent",
        "Estimated Annual Rent",
        "Projected Expenses",
        "NOI",
        "Cap Rate",
        "Listed By",
        "Primary Image",
        "Listing URL",
    ];

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Text(&self.address),
            Cell::Text(&self.city),
            Cell::Text(&self.state),
            Cell::Text(&self.zip),
            Cell::Number(self.listing_price),
            Cell::Text(&self.beds),
            Cell::Text(&self.baths),
            Cell::Number(self.sqft),
            Cell::Number(self.lot_sqft),
            Cell::Text(&self.property_type),
            Cell::Text(&self.status),
            Cell::Number(self.median_rent),
            Cell::Number(self.estimated_annual_rent),
            Cell::Number(self.projected_expenses),
            Cell::Number(self.noi),
            Cell::Number(self.cap_rate),
            Cell::Text(&self.listed_by),
            Cell::Text(&self.primary_image),
            Cell::Text(&self.listing_url),
        ]
    }
}
