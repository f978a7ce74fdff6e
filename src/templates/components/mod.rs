pub mod card;
pub mod error;
pub mod map;

pub use card::{card, property_card};
pub use error::html_error_response;
pub use map::{listing_map, map_assets};
