//! Transport trait
//!
//! The management API is consumed through [`CloudApi`] so that every
//! workflow can be driven against a stub in tests and against the real
//! transport in production. Implementations live outside this crate
//! (see `stratus-cloudstack`).

use crate::model::{InstanceSnapshot, NamedRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Opaque transport/API failure.
///
/// The transport does not classify its failures; context (which kind,
/// which name) is attached by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ApiError(pub String);

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Management API surface used by the reconciliation core.
///
/// All calls are synchronous request/response from the caller's point
/// of view; no call here retries or caches. The handle must be safe to
/// reuse across sequential calls.
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// Provision a new instance from already-resolved identifiers.
    async fn deploy_instance(
        &self,
        name: &str,
        service_offering_id: &str,
        template_id: &str,
        zone_id: &str,
    ) -> ApiResult<InstanceSnapshot>;

    /// Fetch one instance by id. `Ok(None)` means the remote system
    /// reports the id as unknown; `Err` is a transport/API failure.
    async fn instance_by_id(&self, id: &str) -> ApiResult<Option<InstanceSnapshot>>;

    /// List instances, optionally narrowed by a name filter. The
    /// filter's matching semantics are the remote API's own; they are
    /// passed through, not reinterpreted.
    async fn list_instances(&self, name: Option<&str>) -> ApiResult<Vec<InstanceSnapshot>>;

    /// Update mutable fields of an instance. Only the display name is
    /// mutable in this design.
    async fn update_instance(&self, id: &str, name: Option<&str>) -> ApiResult<()>;

    /// List zones whose name matches exactly.
    async fn list_zones(&self, name: &str) -> ApiResult<Vec<NamedRecord>>;

    /// List templates whose name matches exactly.
    async fn list_templates(&self, name: &str) -> ApiResult<Vec<NamedRecord>>;

    /// List service offerings whose name matches exactly.
    async fn list_service_offerings(&self, name: &str) -> ApiResult<Vec<NamedRecord>>;
}
