mod batch;
mod geocoder;
mod throttle;

pub use batch::{
    address_query, geocode_records, map_center, GeocodedRecord, Locatable, MapView,
};
pub use geocoder::{Coordinate, GeocodeError, Geocoder, NominatimGeocoder};
pub use throttle::Throttle;
