//! Runtime configuration, read from the environment (optionally seeded from a
//! `.env` file by `main`).
//!
//! Parsing goes through `AppConfig::from_lookup` so tests can supply a map
//! instead of mutating the process environment.

use crate::analysis::InvestmentParams;
use crate::listings::ExtractionPolicy;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_EXPENSE_RATIO: f64 = 0.5;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub realtor: RealtorConfig,
    pub analysis: AnalysisConfig,
    pub geocoding: GeocodingConfig,
}

#[derive(Debug, Clone)]
pub struct RealtorConfig {
    pub api_key: String,
    pub api_host: String,
    pub base_url: String,
    pub search_radius: String,
    pub limit: u32,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub expense_ratio: f64,
    pub top_n: Option<usize>,
    pub rental_policy: ExtractionPolicy,
    pub sale_policy: ExtractionPolicy,
}

impl AnalysisConfig {
    pub fn investment_params(&self) -> InvestmentParams {
        InvestmentParams {
            expense_ratio: self.expense_ratio,
            top_n: self.top_n,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub enabled: bool,
    pub base_url: String,
    pub user_agent: String,
    pub min_interval: Duration,
    pub timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| vars.get(name).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let api_key = env
            .get("REALTOR_API_KEY")
            .ok_or(ConfigError::Missing("REALTOR_API_KEY"))?;

        let timeout = Duration::from_secs(env.parse_or("HTTP_TIMEOUT_SECS", 30u64)?);

        let realtor = RealtorConfig {
            api_key,
            api_host: env.get_or("REALTOR_API_HOST", "realtor16.p.rapidapi.com"),
            base_url: env.get_or("REALTOR_BASE_URL", "https://realtor16.p.rapidapi.com"),
            search_radius: env.get_or("SEARCH_RADIUS", "0"),
            limit: env.parse_or("LISTING_LIMIT", 1000u32)?,
            timeout,
        };

        let expense_ratio = match env.get("EXPENSE_RATIO") {
            Some(raw) => parse_expense_ratio(&raw)?,
            None => {
                warn!(
                    expense_ratio = DEFAULT_EXPENSE_RATIO,
                    "EXPENSE_RATIO not set, using default"
                );
                DEFAULT_EXPENSE_RATIO
            }
        };

        let top_n = match env.get("TOP_N") {
            Some(raw) => Some(parse_value::<usize>("TOP_N", &raw)?),
            None => None,
        };

        let analysis = AnalysisConfig {
            expense_ratio,
            top_n,
            rental_policy: env.parse_or("RENTAL_EXTRACTION_POLICY", ExtractionPolicy::SkipRecord)?,
            sale_policy: env.parse_or("SALE_EXTRACTION_POLICY", ExtractionPolicy::DefaultField)?,
        };

        let min_interval_ms: u64 = env.parse_or("GEOCODE_MIN_INTERVAL_MS", 1000u64)?;
        if min_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                name: "GEOCODE_MIN_INTERVAL_MS",
                value: "0".into(),
                reason: "geocoding must be rate limited".into(),
            });
        }

        let geocoding = GeocodingConfig {
            enabled: env.parse_or("GEOCODING_ENABLED", true)?,
            base_url: env.get_or("GEOCODER_BASE_URL", "https://nominatim.openstreetmap.org"),
            user_agent: env.get_or("GEOCODER_USER_AGENT", "rent_scout/0.1"),
            min_interval: Duration::from_millis(min_interval_ms),
            timeout,
        };

        Ok(AppConfig {
            bind_addr: env.parse_or("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            max_workers: env.parse_or("MAX_WORKERS", 8usize)?,
            realtor,
            analysis,
            geocoding,
        })
    }
}

fn parse_expense_ratio(raw: &str) -> Result<f64, ConfigError> {
    let ratio = parse_value::<f64>("EXPENSE_RATIO", raw)?;
    if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
        return Err(ConfigError::Invalid {
            name: "EXPENSE_RATIO",
            value: raw.to_string(),
            reason: "must be between 0 and 1".into(),
        });
    }
    Ok(ratio)
}

fn parse_value<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Set and non-blank.
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.trim().is_empty())
    }

    fn get_or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn parse_or<T>(&self, name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(name) {
            Some(raw) => parse_value(name, &raw),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn api_key_is_required() {
        let err = AppConfig::from_map(&vars(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("REALTOR_API_KEY"));
    }

    #[test]
    fn defaults_apply() {
        let cfg = AppConfig::from_map(&vars(&[("REALTOR_API_KEY", "k")])).unwrap();

        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(cfg.max_workers, 8);
        assert_eq!(cfg.realtor.limit, 1000);
        assert_eq!(cfg.realtor.search_radius, "0");
        assert_eq!(cfg.analysis.expense_ratio, DEFAULT_EXPENSE_RATIO);
        assert_eq!(cfg.analysis.top_n, None);
        assert_eq!(cfg.analysis.rental_policy, ExtractionPolicy::SkipRecord);
        assert_eq!(cfg.analysis.sale_policy, ExtractionPolicy::DefaultField);
        assert!(cfg.geocoding.enabled);
        assert_eq!(cfg.geocoding.min_interval, Duration::from_secs(1));
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = AppConfig::from_map(&vars(&[
            ("REALTOR_API_KEY", "k"),
            ("EXPENSE_RATIO", "0.4"),
            ("TOP_N", "25"),
            ("LISTING_LIMIT", "200"),
            ("RENTAL_EXTRACTION_POLICY", "default"),
            ("SALE_EXTRACTION_POLICY", "skip"),
            ("GEOCODE_MIN_INTERVAL_MS", "1500"),
            ("GEOCODING_ENABLED", "false"),
            ("BIND_ADDR", "0.0.0.0:8080"),
        ]))
        .unwrap();

        assert_eq!(cfg.analysis.expense_ratio, 0.4);
        assert_eq!(cfg.analysis.top_n, Some(25));
        assert_eq!(cfg.realtor.limit, 200);
        assert_eq!(cfg.analysis.rental_policy, ExtractionPolicy::DefaultField);
        assert_eq!(cfg.analysis.sale_policy, ExtractionPolicy::SkipRecord);
        assert_eq!(cfg.geocoding.min_interval, Duration::from_millis(1500));
        assert!(!cfg.geocoding.enabled);
        assert_eq!(cfg.bind_addr.port(), 8080);

        let params = cfg.analysis.investment_params();
        assert_eq!(params.expense_ratio, 0.4);
        assert_eq!(params.top_n, Some(25));
    }

    #[test]
    fn invalid_values_are_rejected() {
        for (name, value) in [
            ("EXPENSE_RATIO", "1.5"),
            ("EXPENSE_RATIO", "half"),
            ("EXPENSE_RATIO", "NaN"),
            ("TOP_N", "-3"),
            ("RENTAL_EXTRACTION_POLICY", "lenient"),
            ("GEOCODE_MIN_INTERVAL_MS", "0"),
        ] {
            let result = AppConfig::from_map(&vars(&[("REALTOR_API_KEY", "k"), (name, value)]));
            assert!(
                matches!(result, Err(ConfigError::Invalid { .. })),
                "{name}={value} should be rejected"
            );
        }
    }
}
