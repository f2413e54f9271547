//! CloudStack transport for Stratus
//!
//! Implements the `CloudApi` trait on top of the CloudMonkey (`cmk`)
//! CLI. Request signing, HTTP transport and pagination all live in
//! `cmk`; this crate only builds commands and parses their JSON
//! output.
//!
//! # Requirements
//!
//! - `cmk` must be installed and configured (`cmk set ...` or a
//!   profile in `~/.cmk/config`)
//!
//! # Example
//!
//! ```ignore
//! use stratus_cloud::Reconciler;
//! use stratus_cloudstack::CloudstackApi;
//!
//! let api = CloudstackApi::new(Some("production".to_string()));
//! api.check_auth().await?;
//!
//! let reconciler = Reconciler::new(&api);
//! let observed = reconciler.create(&desired).await?;
//! ```

pub mod cmk;
pub mod error;
pub mod provider;

pub use cmk::{Cmk, EntityRef, VirtualMachineInfo};
pub use error::{CloudstackError, Result};
pub use provider::CloudstackApi;
