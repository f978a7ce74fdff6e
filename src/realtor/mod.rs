mod client;
mod realtor_error;

pub use client::{ListingCategory, ListingSource, RealtorClient};
pub use realtor_error::RealtorError;
