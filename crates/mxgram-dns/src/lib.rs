//! DNS adapter (hickory-resolver).
//!
//! This crate implements the `mxgram-core` MxResolver port over real DNS.

use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::{
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    proto::op::ResponseCode,
    TokioAsyncResolver,
};
use tracing::debug;

use mxgram_core::mx::{MxHost, MxLookupError, MxResolver};

pub struct HickoryMxResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryMxResolver {
    /// Resolver with the given per-query timeout and attempt count.
    pub fn new(timeout: Duration, attempts: usize) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = attempts;

        let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), opts);
        Self { resolver }
    }
}

#[async_trait]
impl MxResolver for HickoryMxResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxHost>, MxLookupError> {
        debug!(domain, "MX lookup");
        let answer = self
            .resolver
            .mx_lookup(domain)
            .await
            .map_err(|e| map_resolve_error(&e))?;

        let hosts: Vec<MxHost> = answer
            .iter()
            .map(|mx| MxHost {
                exchange: mx.exchange().to_string(),
                preference: mx.preference(),
            })
            .collect();
        debug!(domain, count = hosts.len(), "MX answer");
        Ok(hosts)
    }
}

/// Map hickory's error kinds onto the closed lookup-error set.
///
/// An NXDOMAIN negative response means the domain itself is absent; any
/// other negative response means the name exists without MX records.
fn map_resolve_error(error: &ResolveError) -> MxLookupError {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            if *response_code == ResponseCode::NXDomain {
                MxLookupError::NxDomain
            } else {
                MxLookupError::NoRecords
            }
        }
        ResolveErrorKind::NoConnections => MxLookupError::NoNameservers,
        _ => MxLookupError::Other(error.to_string()),
    }
}
