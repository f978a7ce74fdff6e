// src/listings/status.rs

use crate::listings::RawListing;

/// A vendor flag and the label it contributes to a listing's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFlag {
    pub key: &'static str,
    pub label: &'static str,
}

const NEW_LISTING: StatusFlag = StatusFlag { key: "is_new_listing", label: "NEW LISTING" };
const PRICE_REDUCED: StatusFlag = StatusFlag { key: "is_price_reduced", label: "PRICE REDUCED" };
const PENDING: StatusFlag = StatusFlag { key: "is_pending", label: "PENDING" };
const FORECLOSURE: StatusFlag = StatusFlag { key: "is_foreclosure", label: "FORECLOSURE" };
const COMING_SOON: StatusFlag = StatusFlag { key: "is_coming_soon", label: "COMING SOON" };
const NEW_CONSTRUCTION: StatusFlag =
    StatusFlag { key: "is_new_construction", label: "NEW CONSTRUCTION" };
const CONTINGENT: StatusFlag = StatusFlag { key: "is_contingent", label: "CONTINGENT" };

pub const RENTAL_STATUS_FLAGS: &[StatusFlag] = &[NEW_LISTING, PENDING];

pub const SALE_STATUS_FLAGS: &[StatusFlag] = &[
    NEW_LISTING,
    PRICE_REDUCED,
    PENDING,
    FORECLOSURE,
    COMING_SOON,
    NEW_CONSTRUCTION,
    CONTINGENT,
];

pub const ACTIVE: &str = "ACTIVE";

/// Human status for a listing's `flags` object.
///
/// Labels appear in the order of `order`, not in the order the vendor sent
/// the keys, so the same flag set always yields the same string. A listing
/// with no set flag (or no usable `flags` object) is `"ACTIVE"`.
pub fn derive_status(flags: Option<RawListing<'_>>, order: &[StatusFlag]) -> String {
    let Some(flags) = flags else {
        return ACTIVE.to_string();
    };

    let labels: Vec<&str> = order
        .iter()
        .filter(|flag| flags.flag(flag.key))
        .map(|flag| flag.label)
        .collect();

    if labels.is_empty() {
        ACTIVE.to_string()
    } else {
        labels.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_of(flags: serde_json::Value, order: &[StatusFlag]) -> String {
        derive_status(Some(RawListing::new(&flags)), order)
    }

    #[test]
    fn labels_follow_declared_order() {
        assert_eq!(status_of(json!({ "is_pending": true }), SALE_STATUS_FLAGS), "PENDING");
        assert_eq!(
            status_of(
                json!({ "is_foreclosure": true, "is_new_listing": true }),
                SALE_STATUS_FLAGS
            ),
            "NEW LISTING, FORECLOSURE"
        );
        assert_eq!(
            status_of(
                json!({
                    "is_contingent": true,
                    "is_coming_soon": true,
                    "is_price_reduced": true
                }),
                SALE_STATUS_FLAGS
            ),
            "PRICE REDUCED, COMING SOON, CONTINGENT"
        );
    }

    #[test]
    fn rentals_only_know_two_flags() {
        let flags = json!({ "is_pending": true, "is_new_listing": true, "is_foreclosure": true });
        assert_eq!(status_of(flags, RENTAL_STATUS_FLAGS), "NEW LISTING, PENDING");
    }

    #[test]
    fn no_flags_is_active() {
        assert_eq!(status_of(json!({}), SALE_STATUS_FLAGS), ACTIVE);
        assert_eq!(
            status_of(json!({ "is_pending": false, "is_new_listing": null }), SALE_STATUS_FLAGS),
            ACTIVE
        );
        assert_eq!(derive_status(None, RENTAL_STATUS_FLAGS), ACTIVE);
    }
}
