//! Shared enrichment helper
//!
//! Every entity policy resolves its foreign references through
//! [`RemoteLinks`], which owns URL construction, error mapping and the
//! fail-closed / partial decision.

use tracing::{debug, error, warn};

use super::config::EnrichmentMode;
use crate::error::{CompositionError, Result};
use crate::ports::RemoteResolver;
use crate::remote::{RemoteEndpoints, Resolved};

/// Resolver plus the fixed addresses it resolves against
pub struct RemoteLinks<R> {
    resolver: R,
    endpoints: RemoteEndpoints,
    mode: EnrichmentMode,
}

impl<R> RemoteLinks<R>
where
    R: RemoteResolver,
{
    pub fn new(resolver: R, endpoints: RemoteEndpoints, mode: EnrichmentMode) -> Self {
        Self {
            resolver,
            endpoints,
            mode,
        }
    }

    pub fn endpoints(&self) -> &RemoteEndpoints {
        &self.endpoints
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolve one reference by id
    ///
    /// A payload whose identifier disagrees with `id` is treated as a
    /// malformed response. A payload without identifier is stamped with `id`.
    pub async fn fetch<T: Resolved>(&self, id: i32) -> Result<Option<T>> {
        let target = T::TARGET;
        let url = self.endpoints.url_for(target, id);
        debug!(target_service = target.service_name(), url = %url, "Resolving remote reference");

        let outcome = match self.resolver.get_json::<T>(&url).await {
            Ok(Some(mut found)) => match found.remote_id() {
                Some(remote) if remote != id => Err(format!(
                    "payload carries id {} instead of {}",
                    remote, id
                )),
                Some(_) => Ok(Some(found)),
                None => {
                    found.stamp_id(id);
                    Ok(Some(found))
                }
            },
            Ok(None) => {
                debug!(target_service = target.service_name(), id, "Remote reference absent");
                Ok(None)
            }
            Err(err) => Err(err.to_string()),
        };

        match outcome {
            Ok(found) => Ok(found),
            Err(reason) => match self.mode {
                EnrichmentMode::FailClosed => {
                    error!(
                        target_service = target.service_name(),
                        id,
                        reason = %reason,
                        "Remote resolution failed"
                    );
                    Err(CompositionError::remote_unavailable(
                        target.service_name(),
                        id,
                        reason,
                    ))
                }
                EnrichmentMode::Partial => {
                    warn!(
                        target_service = target.service_name(),
                        id,
                        reason = %reason,
                        "Remote resolution failed, rendering reference as absent"
                    );
                    Ok(None)
                }
            },
        }
    }

    /// Keep `current` when already resolved, otherwise fetch it
    pub async fn fill<T: Resolved>(&self, id: i32, current: Option<T>) -> Result<Option<T>> {
        match current {
            Some(found) => Ok(Some(found)),
            None => self.fetch(id).await,
        }
    }
}
