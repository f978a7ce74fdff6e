use serde::Serialize;

/// Placeholder for any text field the listing did not carry.
pub const NA: &str = "N/A";

pub const RENTAL_URL_BASE: &str = "https://www.realtor.com/rentals/details";
pub const SALE_URL_BASE: &str = "https://www.realtor.com/realestateandhomes-detail";

/// One rental listing, flattened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalRecord {
    // Address
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,

    /// Monthly rent, `None` when absent or not a number.
    pub rent: Option<f64>,
    pub formatted_rent: String,

    // Description (canonical text, grouping keys)
    pub beds: String,
    pub baths: String,
    pub sqft: String,
    pub property_type: String,
    pub sub_type: String,

    pub status: String,

    // Free-text detail blocks
    pub security_deposit: String,
    pub available_from: String,
    pub pets_allowed: String,

    pub listing_id: String,
    pub property_id: String,
    pub list_date: String,

    pub contact_phone: String,
    pub primary_image: String,
    pub additional_photos: u32,
    pub virtual_tour: String,
    pub listing_url: String,
}

/// One for-sale listing, flattened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,

    /// Raw list price, `None` when absent or not a number.
    pub price: Option<f64>,

    pub beds: String,
    pub baths: String,
    pub sqft: String,
    pub lot_sqft: String,
    pub property_type: String,

    pub status: String,

    pub listing_id: String,
    pub property_id: String,
    pub list_date: String,

    pub primary_image: String,
    pub additional_photos: u32,
    pub virtual_tour: String,
    pub listed_by: String,
    pub listing_url: String,
}

/// Builds the public listing URL, `"N/A"` without a permalink.
pub fn listing_url(base: &str, permalink: &str) -> String {
    if permalink == NA {
        NA.to_string()
    } else {
        format!("{base}/{permalink}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_url_needs_a_permalink() {
        assert_eq!(
            listing_url(RENTAL_URL_BASE, "123-Main-St_Kirkwood_MO_63122_M12345-67890"),
            "https://www.realtor.com/rentals/details/123-Main-St_Kirkwood_MO_63122_M12345-67890"
        );
        assert_eq!(
            listing_url(SALE_URL_BASE, "9-Elm-Ave"),
            "https://www.realtor.com/realestateandhomes-detail/9-Elm-Ave"
        );
        assert_eq!(listing_url(SALE_URL_BASE, NA), NA);
    }
}
