use crate::config::AppConfig;
use crate::geo::NominatimGeocoder;
use crate::realtor::RealtorClient;
use crate::router::handle;
use crate::state::AppState;
use astra::Server;
use tracing::{error, info};

mod analysis;
mod config;
mod errors;
mod format;
mod geo;
mod listings;
mod pipeline;
mod realtor;
mod responses;
mod router;
mod spreadsheets;
mod state;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    dotenv::dotenv().ok();
    init_logging();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let listings = match RealtorClient::new(&config.realtor) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Could not build the listings client");
            std::process::exit(1);
        }
    };

    let geocoder = match NominatimGeocoder::new(&config.geocoding) {
        Ok(geocoder) => geocoder,
        Err(e) => {
            error!(error = %e, "Could not build the geocoder");
            std::process::exit(1);
        }
    };

    let addr = config.bind_addr;
    let max_workers = config.max_workers;
    let state = AppState::new(config, Box::new(listings), Box::new(geocoder));

    info!(%addr, max_workers, "Starting server");

    let server = Server::bind(&addr).max_workers(max_workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => {
            if err.status() >= 500 {
                error!(error = %err, "Request failed");
            }
            templates::html_error_response(err)
        }
    });

    if let Err(e) = result {
        error!(error = %e, "Server ended with error");
    }

    info!("Server shut down cleanly.");
}

/// `RUST_LOG` overrides the default `rent_scout=info` filter;
/// `RENT_SCOUT_LOG_JSON` switches to JSON lines.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rent_scout=info"));

    if std::env::var("RENT_SCOUT_LOG_JSON").is_ok() {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
