mod details;
mod normalize;
mod raw;
mod records;
mod status;

pub use details::{DetailRule, DetailRules};
pub use normalize::{
    normalize_rentals, normalize_sales, ExtractionPolicy, NormalizeError, Normalized,
};
pub use raw::{numeric, RawListing};
pub use records::{RentalRecord, SaleRecord, NA};
pub use status::{derive_status, StatusFlag, RENTAL_STATUS_FLAGS, SALE_STATUS_FLAGS};
