//! `CloudApi` implementation over the cmk wrapper

use crate::cmk::{Cmk, EntityRef, VirtualMachineInfo};
use crate::error::Result;
use async_trait::async_trait;
use stratus_cloud::{ApiError, ApiResult, CloudApi, InstanceSnapshot, NamedRecord};

/// CloudStack transport built at configuration time and injected into
/// each workflow as `&dyn CloudApi`.
pub struct CloudstackApi {
    cmk: Cmk,
}

impl CloudstackApi {
    pub fn new(profile: Option<String>) -> Self {
        Self {
            cmk: Cmk::new(profile),
        }
    }

    /// Verify the CLI is present and the profile's credentials work.
    pub async fn check_auth(&self) -> Result<()> {
        self.cmk.check_auth().await
    }
}

impl From<VirtualMachineInfo> for InstanceSnapshot {
    fn from(vm: VirtualMachineInfo) -> Self {
        Self {
            id: vm.id,
            name: vm.name,
            zone_id: vm.zoneid,
            zone_name: vm.zonename,
            template_id: vm.templateid,
            template_name: vm.templatename,
            service_offering_id: vm.serviceofferingid,
            service_offering_name: vm.serviceofferingname,
            state: vm.state,
        }
    }
}

fn to_records(entities: Vec<EntityRef>) -> Vec<NamedRecord> {
    entities
        .into_iter()
        .map(|e| NamedRecord::new(e.id, e.name))
        .collect()
}

fn opaque(e: crate::error::CloudstackError) -> ApiError {
    ApiError::new(e.to_string())
}

#[async_trait]
impl CloudApi for CloudstackApi {
    async fn deploy_instance(
        &self,
        name: &str,
        service_offering_id: &str,
        template_id: &str,
        zone_id: &str,
    ) -> ApiResult<InstanceSnapshot> {
        self.cmk
            .deploy_virtual_machine(name, service_offering_id, template_id, zone_id)
            .await
            .map(Into::into)
            .map_err(opaque)
    }

    async fn instance_by_id(&self, id: &str) -> ApiResult<Option<InstanceSnapshot>> {
        self.cmk
            .get_virtual_machine(id)
            .await
            .map(|vm| vm.map(Into::into))
            .map_err(opaque)
    }

    async fn list_instances(&self, name: Option<&str>) -> ApiResult<Vec<InstanceSnapshot>> {
        self.cmk
            .list_virtual_machines(name)
            .await
            .map(|vms| vms.into_iter().map(Into::into).collect())
            .map_err(opaque)
    }

    async fn update_instance(&self, id: &str, name: Option<&str>) -> ApiResult<()> {
        self.cmk.update_virtual_machine(id, name).await.map_err(opaque)
    }

    async fn list_zones(&self, name: &str) -> ApiResult<Vec<NamedRecord>> {
        self.cmk.list_zones(name).await.map(to_records).map_err(opaque)
    }

    async fn list_templates(&self, name: &str) -> ApiResult<Vec<NamedRecord>> {
        self.cmk.list_templates(name).await.map(to_records).map_err(opaque)
    }

    async fn list_service_offerings(&self, name: &str) -> ApiResult<Vec<NamedRecord>> {
        self.cmk
            .list_service_offerings(name)
            .await
            .map(to_records)
            .map_err(opaque)
    }
}
