//! HTTP Remote Resolver Implementation
//!
//! This module implements the `RemoteResolver` trait with a shared `reqwest`
//! client. Every call is a single GET with no retry; transport, status and
//! payload failures are reported as `ResolveError` variants for the engine
//! to map.

use std::time::Duration;

use mercato_domain::ports::{RemoteResolver, ResolveError};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};

/// Settings for [`HttpResolver`]
#[derive(Debug, Clone)]
pub struct HttpResolverConfig {
    /// Per-call timeout enforced by the client
    pub timeout: Duration,
    /// User-Agent sent with every call
    pub user_agent: String,
    /// Report a remote 404 as an absent value instead of an error
    pub not_found_as_absent: bool,
}

impl Default for HttpResolverConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            user_agent: concat!("mercato/", env!("CARGO_PKG_VERSION")).to_string(),
            not_found_as_absent: false,
        }
    }
}

/// `reqwest`-based implementation of the RemoteResolver port
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone)]
pub struct HttpResolver {
    client: Client,
    not_found_as_absent: bool,
}

impl HttpResolver {
    /// Build a resolver with its own client
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error when the client cannot be constructed
    /// (e.g. TLS backend initialization failure).
    pub fn new(config: HttpResolverConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        debug!(
            timeout_ms = config.timeout.as_millis() as u64,
            not_found_as_absent = config.not_found_as_absent,
            "Initializing HttpResolver"
        );
        Ok(Self::with_client(client, config.not_found_as_absent))
    }

    /// Wrap an existing client
    pub fn with_client(client: Client, not_found_as_absent: bool) -> Self {
        Self {
            client,
            not_found_as_absent,
        }
    }
}

impl RemoteResolver for HttpResolver {
    #[instrument(level = "debug", skip(self))]
    fn get_json<T>(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Option<T>, ResolveError>> + Send
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.client.clone();
        let not_found_as_absent = self.not_found_as_absent;
        let url = url.to_string();

        async move {
            let response = client.get(&url).send().await.map_err(|err| {
                error!(url = %url, error = %err, "Remote call failed");
                ResolveError::Transport(err.to_string())
            })?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND && not_found_as_absent {
                debug!(url = %url, "Remote answered 404, treating as absent");
                return Ok(None);
            }
            if !status.is_success() {
                warn!(url = %url, status = status.as_u16(), "Remote answered with an error status");
                return Err(ResolveError::Status(status.as_u16()));
            }

            match response.json::<T>().await {
                Ok(body) => {
                    debug!(url = %url, "Remote payload decoded");
                    Ok(Some(body))
                }
                Err(err) => {
                    error!(url = %url, error = %err, "Failed to decode remote payload");
                    Err(ResolveError::Decode(err.to_string()))
                }
            }
        }
    }
}
