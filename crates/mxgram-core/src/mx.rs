//! MX lookup port and result classification.

use async_trait::async_trait;
use serde::Serialize;

/// One mail exchange entry from an MX answer set, in resolver order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MxHost {
    pub exchange: String,
    pub preference: u16,
}

/// Closed set of lookup failures the classifier understands.
///
/// Resolver adapters map their library's error types onto this enum so
/// classification stays a pure function testable with fakes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MxLookupError {
    #[error("domain does not exist")]
    NxDomain,

    #[error("no MX records published")]
    NoRecords,

    #[error("no reachable nameservers")]
    NoNameservers,

    #[error("{0}")]
    Other(String),
}

/// Port for MX resolution. `mxgram-dns` provides the hickory-resolver
/// implementation; tests inject fakes.
#[async_trait]
pub trait MxResolver: Send + Sync {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxHost>, MxLookupError>;
}

/// Classified outcome of one domain check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainCheck {
    Valid { mx_hosts: Vec<MxHost> },
    DomainNotFound,
    NoMx { detail: &'static str },
    Failed { message: String },
}

impl DomainCheck {
    /// Short tag used in the results log.
    pub fn status_tag(&self) -> &'static str {
        match self {
            DomainCheck::Valid { .. } => "valid",
            DomainCheck::DomainNotFound => "domain_not_exists",
            DomainCheck::NoMx { .. } => "no_mx",
            DomainCheck::Failed { .. } => "error",
        }
    }
}

/// Map a lookup result onto a check status.
///
/// An empty answer set without an error is treated like a no-records answer;
/// real resolvers report that state as an error, but the port makes it
/// representable.
pub fn classify(result: Result<Vec<MxHost>, MxLookupError>) -> DomainCheck {
    match result {
        Ok(hosts) if hosts.is_empty() => DomainCheck::NoMx {
            detail: "no MX records published",
        },
        Ok(hosts) => DomainCheck::Valid { mx_hosts: hosts },
        Err(MxLookupError::NxDomain) => DomainCheck::DomainNotFound,
        Err(MxLookupError::NoRecords) => DomainCheck::NoMx {
            detail: "no MX records published",
        },
        Err(MxLookupError::NoNameservers) => DomainCheck::NoMx {
            detail: "no reachable nameservers",
        },
        Err(MxLookupError::Other(message)) => DomainCheck::Failed { message },
    }
}
