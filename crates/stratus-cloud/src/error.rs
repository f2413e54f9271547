//! Reconciliation error types
//!
//! Every error here is terminal for the invocation that produced it:
//! nothing in this crate retries, suppresses or recovers.

use crate::model::ResourceKind;
use thiserror::Error;

/// Errors surfaced by the resolver, lifecycle manager and reconciler.
#[derive(Error, Debug)]
pub enum CloudError {
    /// The list query behind a name lookup failed at the transport.
    #[error("failed to look up {kind} '{name}': {message}")]
    Lookup {
        kind: ResourceKind,
        name: String,
        message: String,
    },

    /// The lookup succeeded but matched nothing.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: ResourceKind, name: String },

    /// The provisioning call failed.
    #[error("failed to provision instance: {0}")]
    Provision(String),

    /// A non-lookup remote call failed for transport/API reasons.
    #[error("API error: {0}")]
    Transport(String),

    /// The instance update call failed.
    #[error("failed to update instance: {0}")]
    Update(String),

    /// A local precondition was violated; no remote call was made.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// The requested operation is deliberately unsupported.
    #[error("not implemented: {0}")]
    NotImplemented(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_kind_and_name() {
        let err = CloudError::NotFound {
            kind: ResourceKind::Zone,
            name: "zone-1".into(),
        };
        assert_eq!(err.to_string(), "zone 'zone-1' not found");

        let err = CloudError::Lookup {
            kind: ResourceKind::Template,
            name: "ubuntu-24".into(),
            message: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to look up template 'ubuntu-24': connection refused"
        );
    }
}
