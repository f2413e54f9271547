//! In-memory transport stub for tests
//!
//! Available to downstream crates through the `test-utils` feature.
//! The stub serves canned zone/template/offering records, keeps
//! deployed instances in memory, records every call in order, and can
//! be told to fail the next invocation of any operation.

use crate::api::{ApiError, ApiResult, CloudApi};
use crate::model::{InstanceSnapshot, NamedRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct StubState {
    zones: Vec<NamedRecord>,
    templates: Vec<NamedRecord>,
    offerings: Vec<NamedRecord>,
    instances: Vec<InstanceSnapshot>,
    failures: HashMap<String, Vec<String>>,
    calls: Vec<String>,
    next_id: u32,
}

/// Programmable [`CloudApi`] stub.
#[derive(Default)]
pub struct StubApi {
    state: Mutex<StubState>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(self, id: &str, name: &str) -> Self {
        self.state.lock().unwrap().zones.push(NamedRecord::new(id, name));
        self
    }

    pub fn with_template(self, id: &str, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .templates
            .push(NamedRecord::new(id, name));
        self
    }

    pub fn with_service_offering(self, id: &str, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .offerings
            .push(NamedRecord::new(id, name));
        self
    }

    pub fn with_instance(self, snapshot: InstanceSnapshot) -> Self {
        self.state.lock().unwrap().instances.push(snapshot);
        self
    }

    /// Make the next invocation of `op` fail with `message`. Repeated
    /// calls queue further one-shot failures for the same operation.
    pub fn fail_next(&self, op: &str, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .entry(op.to_string())
            .or_default()
            .push(message.to_string());
    }

    /// Operations invoked so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Current remote-side view of an instance, if present.
    pub fn instance(&self, id: &str) -> Option<InstanceSnapshot> {
        self.state
            .lock()
            .unwrap()
            .instances
            .iter()
            .find(|vm| vm.id == id)
            .cloned()
    }

    fn enter(&self, op: &str) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op.to_string());
        if let Some(queue) = state.failures.get_mut(op) {
            if !queue.is_empty() {
                return Err(ApiError::new(queue.remove(0)));
            }
        }
        Ok(())
    }

    fn filter_by_name(records: &[NamedRecord], name: &str) -> Vec<NamedRecord> {
        records.iter().filter(|r| r.name == name).cloned().collect()
    }
}

#[async_trait]
impl CloudApi for StubApi {
    async fn deploy_instance(
        &self,
        name: &str,
        service_offering_id: &str,
        template_id: &str,
        zone_id: &str,
    ) -> ApiResult<InstanceSnapshot> {
        self.enter("deploy_instance")?;

        let mut state = self.state.lock().unwrap();
        state.next_id += 1;

        let name_of = |records: &[NamedRecord], id: &str| {
            records
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.name.clone())
                .unwrap_or_default()
        };

        let snapshot = InstanceSnapshot {
            id: format!("i-{}", state.next_id),
            name: name.to_string(),
            zone_id: zone_id.to_string(),
            zone_name: name_of(&state.zones, zone_id),
            template_id: template_id.to_string(),
            template_name: name_of(&state.templates, template_id),
            service_offering_id: service_offering_id.to_string(),
            service_offering_name: name_of(&state.offerings, service_offering_id),
            state: Some("Running".to_string()),
        };

        state.instances.push(snapshot.clone());
        Ok(snapshot)
    }

    async fn instance_by_id(&self, id: &str) -> ApiResult<Option<InstanceSnapshot>> {
        self.enter("instance_by_id")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .instances
            .iter()
            .find(|vm| vm.id == id)
            .cloned())
    }

    async fn list_instances(&self, name: Option<&str>) -> ApiResult<Vec<InstanceSnapshot>> {
        self.enter("list_instances")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .instances
            .iter()
            .filter(|vm| name.is_none_or(|prefix| vm.name.starts_with(prefix)))
            .cloned()
            .collect())
    }

    async fn update_instance(&self, id: &str, name: Option<&str>) -> ApiResult<()> {
        self.enter("update_instance")?;

        let mut state = self.state.lock().unwrap();
        let vm = state
            .instances
            .iter_mut()
            .find(|vm| vm.id == id)
            .ok_or_else(|| ApiError::new(format!("unable to find instance '{id}'")))?;

        if let Some(name) = name {
            vm.name = name.to_string();
        }
        Ok(())
    }

    async fn list_zones(&self, name: &str) -> ApiResult<Vec<NamedRecord>> {
        self.enter("list_zones")?;
        Ok(Self::filter_by_name(&self.state.lock().unwrap().zones, name))
    }

    async fn list_templates(&self, name: &str) -> ApiResult<Vec<NamedRecord>> {
        self.enter("list_templates")?;
        Ok(Self::filter_by_name(
            &self.state.lock().unwrap().templates,
            name,
        ))
    }

    async fn list_service_offerings(&self, name: &str) -> ApiResult<Vec<NamedRecord>> {
        self.enter("list_service_offerings")?;
        Ok(Self::filter_by_name(
            &self.state.lock().unwrap().offerings,
            name,
        ))
    }
}
