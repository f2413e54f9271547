//! Stratus reconciliation core
//!
//! This crate turns a declarative description of a virtual machine into
//! the imperative calls a CloudStack-compatible management API expects,
//! and maps the responses back into the record the caller persists.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │            orchestrator / CLI / plugin           │
//! └─────────────────┬───────────────────────────────┘
//!                   │ create / read / update / delete
//! ┌─────────────────▼───────────────────────────────┐
//! │                 Reconciler                       │
//! │  ┌──────────────┐      ┌────────────────────┐   │
//! │  │   Resolver   │      │ InstanceLifecycle  │   │
//! │  │  name → id   │      │ deploy/fetch/rename│   │
//! │  └──────┬───────┘      └─────────┬──────────┘   │
//! └─────────┼────────────────────────┼──────────────┘
//!           │     trait CloudApi     │
//! ┌─────────▼────────────────────────▼──────────────┐
//! │        transport (stratus-cloudstack, stubs)     │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The transport is always injected as a trait object; nothing in this
//! crate holds a global client.

pub mod api;
pub mod diag;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod reconcile;
pub mod resolve;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-exports
pub use api::{ApiError, ApiResult, CloudApi};
pub use diag::{Diagnostic, Outcome};
pub use error::{CloudError, Result};
pub use lifecycle::InstanceLifecycle;
pub use model::{Instance, InstanceSnapshot, InstanceSpec, NamedRecord, ResourceKind};
pub use reconcile::Reconciler;
pub use resolve::Resolver;
