use crate::config::AppConfig;
use crate::geo::Geocoder;
use crate::listings::DetailRules;
use crate::realtor::ListingSource;

/// Everything a request handler needs. Built once in `main`, shared read-only
/// by every worker thread.
pub struct AppState {
    pub config: AppConfig,
    pub detail_rules: DetailRules,
    pub listings: Box<dyn ListingSource>,
    pub geocoder: Box<dyn Geocoder>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        listings: Box<dyn ListingSource>,
        geocoder: Box<dyn Geocoder>,
    ) -> Self {
        Self {
            config,
            detail_rules: DetailRules::default(),
            listings,
            geocoder,
        }
    }
}
