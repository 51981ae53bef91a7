//! Environment configuration
//!
//! Every setting has a default so the service starts with an empty
//! environment. Malformed values are startup errors.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use mercato_domain::composition::{CompositionConfig, EnrichmentMode};
use mercato_domain::remote::RemoteEndpoints;
use mercato_http::HttpResolverConfig;

/// Settings of the API binary
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub endpoints: RemoteEndpoints,
    pub composition: CompositionConfig,
    pub resolver: HttpResolverConfig,
    pub log_json: bool,
}

impl AppConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = RemoteEndpoints::default();
        let endpoints = RemoteEndpoints {
            user: lookup("MERCATO_USER_SERVICE_URL").unwrap_or(defaults.user),
            product: lookup("MERCATO_PRODUCT_SERVICE_URL").unwrap_or(defaults.product),
            order: lookup("MERCATO_ORDER_SERVICE_URL").unwrap_or(defaults.order),
        };

        let enrichment_mode = if parse(&lookup, "MERCATO_PARTIAL_ENRICHMENT", false)? {
            EnrichmentMode::Partial
        } else {
            EnrichmentMode::FailClosed
        };
        let request_timeout = match lookup("MERCATO_REQUEST_TIMEOUT_MS") {
            Some(raw) => Some(Duration::from_millis(parse_value("MERCATO_REQUEST_TIMEOUT_MS", &raw)?)),
            None => None,
        };
        let composition = CompositionConfig {
            max_in_flight: parse(&lookup, "MERCATO_MAX_IN_FLIGHT", 8)?,
            request_timeout,
            enrichment_mode,
            resolve_on_write: parse(&lookup, "MERCATO_RESOLVE_ON_WRITE", false)?,
        };
        if composition.max_in_flight == 0 {
            return Err(anyhow!("MERCATO_MAX_IN_FLIGHT must be at least 1"));
        }

        let resolver = HttpResolverConfig {
            timeout: Duration::from_millis(parse(&lookup, "MERCATO_HTTP_TIMEOUT_MS", 5_000)?),
            not_found_as_absent: parse(&lookup, "MERCATO_REMOTE_404_AS_ABSENT", false)?,
            ..HttpResolverConfig::default()
        };

        Ok(Self {
            host: lookup("MERCATO_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse(&lookup, "MERCATO_PORT", 8080)?,
            endpoints,
            composition,
            resolver,
            log_json: lookup("LOG_FORMAT").is_some_and(|format| format.eq_ignore_ascii_case("json")),
        })
    }

    /// `host:port` to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|err| anyhow!("Invalid value {:?} for {}: {}", raw, name, err))
}
