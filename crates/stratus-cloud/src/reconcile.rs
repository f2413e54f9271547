//! Reconciliation workflow
//!
//! One [`Reconciler`] method per declarative operation. Each call is an
//! independent sequence seeded only by its arguments; no state is
//! shared between invocations and nothing is cached between them.

use crate::api::CloudApi;
use crate::error::Result;
use crate::lifecycle::InstanceLifecycle;
use crate::model::{Instance, InstanceSnapshot, InstanceSpec};
use crate::resolve::Resolver;

/// Drives create/read/update/delete for the instance resource.
pub struct Reconciler<'a> {
    api: &'a dyn CloudApi,
}

impl<'a> Reconciler<'a> {
    pub fn new(api: &'a dyn CloudApi) -> Self {
        Self { api }
    }

    /// Create: resolve zone, template and service offering (in that
    /// order, each a hard gate), deploy, then build the record to
    /// persist. Any resolution failure aborts before the deploy call.
    pub async fn create(&self, desired: &InstanceSpec) -> Result<Instance> {
        let resolver = Resolver::new(self.api);

        let zone_id = resolver.resolve_zone(&desired.zone).await?;
        let template_id = resolver.resolve_template(&desired.template).await?;
        let service_offering_id = resolver
            .resolve_service_offering(&desired.service_offering)
            .await?;

        let snapshot = InstanceLifecycle::new(self.api)
            .create_instance(&desired.name, &service_offering_id, &template_id, &zone_id)
            .await?;

        // Declared names stay as the user wrote them; identifiers come
        // from the deploy response, which is authoritative.
        Ok(Instance {
            id: snapshot.id,
            name: desired.name.clone(),
            zone: desired.zone.clone(),
            template: desired.template.clone(),
            service_offering: desired.service_offering.clone(),
            zone_id: snapshot.zone_id,
            template_id: snapshot.template_id,
            service_offering_id: snapshot.service_offering_id,
        })
    }

    /// Read: fetch the remote state and overwrite every field of the
    /// record except the identifier, which is immutable post-creation.
    /// A fetch failure propagates without touching the prior record.
    pub async fn read(&self, prior: &Instance) -> Result<Instance> {
        let snapshot = InstanceLifecycle::new(self.api)
            .fetch_instance(&prior.id)
            .await?;

        Ok(from_snapshot(&prior.id, snapshot))
    }

    /// Update: rename, then refetch to observe the result. A rename
    /// failure aborts before the refetch. A refetch failure after a
    /// successful rename surfaces as-is, leaving the local record
    /// stale while the remote name has already changed.
    pub async fn update(&self, prior: &Instance, desired: &InstanceSpec) -> Result<Instance> {
        let lifecycle = InstanceLifecycle::new(self.api);

        lifecycle.rename_instance(&prior.id, &desired.name).await?;
        let snapshot = lifecycle.fetch_instance(&prior.id).await?;

        Ok(from_snapshot(&prior.id, snapshot))
    }

    /// Delete: always unsupported; no remote call is attempted.
    pub async fn delete(&self, prior: &Instance) -> Result<()> {
        InstanceLifecycle::new(self.api)
            .delete_instance(&prior.id)
            .await
    }
}

/// Build the persisted record from a fresh snapshot, holding the
/// identifier constant from the prior state.
fn from_snapshot(id: &str, snapshot: InstanceSnapshot) -> Instance {
    Instance {
        id: id.to_string(),
        name: snapshot.name,
        zone: snapshot.zone_name,
        template: snapshot.template_name,
        service_offering: snapshot.service_offering_name,
        zone_id: snapshot.zone_id,
        template_id: snapshot.template_id,
        service_offering_id: snapshot.service_offering_id,
    }
}
