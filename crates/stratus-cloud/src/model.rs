//! Data model for managed instances
//!
//! The `name` fields of [`Instance`] are the declared desired state;
//! the `*_id` fields are computed from the remote API and are never
//! user-supplied.

use serde::{Deserialize, Serialize};

/// The kind of remote entity a lookup or diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Zone,
    Template,
    ServiceOffering,
    Instance,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Zone => write!(f, "zone"),
            ResourceKind::Template => write!(f, "template"),
            ResourceKind::ServiceOffering => write!(f, "service offering"),
            ResourceKind::Instance => write!(f, "instance"),
        }
    }
}

/// A (name, id) pair as listed by the remote API.
///
/// The id is an opaque string; nothing in this crate interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRecord {
    pub id: String,
    pub name: String,
}

impl NamedRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Desired state of an instance: display name plus the human-readable
/// names of the zone, template and service offering to place it on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSpec {
    pub name: String,
    pub zone: String,
    pub template: String,
    pub service_offering: String,
}

impl InstanceSpec {
    pub fn new(
        name: impl Into<String>,
        zone: impl Into<String>,
        template: impl Into<String>,
        service_offering: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            zone: zone.into(),
            template: template.into(),
            service_offering: service_offering.into(),
        }
    }
}

/// An instance exactly as the remote system last reported it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSnapshot {
    pub id: String,
    pub name: String,
    pub zone_id: String,
    pub zone_name: String,
    pub template_id: String,
    pub template_name: String,
    pub service_offering_id: String,
    pub service_offering_name: String,

    /// Remote lifecycle state (e.g. "Running"), passed through opaquely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// The persisted record of a managed instance.
///
/// `id` is assigned by the remote API on creation and immutable from
/// then on. The `*_id` fields always reflect what the API reported,
/// which may differ from what was submitted (normalized form).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    pub name: String,
    pub zone: String,
    pub template: String,
    pub service_offering: String,
    pub zone_id: String,
    pub template_id: String,
    pub service_offering_id: String,
}
