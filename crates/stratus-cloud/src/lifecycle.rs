//! Instance lifecycle manager
//!
//! Thin orchestration over the transport for a single instance:
//! provision, fetch, rename, list. Deletion is deliberately
//! unsupported and fails before any remote call is made.

use crate::api::CloudApi;
use crate::error::{CloudError, Result};
use crate::model::{InstanceSnapshot, ResourceKind};

/// Create/read/update operations for one instance kind.
pub struct InstanceLifecycle<'a> {
    api: &'a dyn CloudApi,
}

impl<'a> InstanceLifecycle<'a> {
    pub fn new(api: &'a dyn CloudApi) -> Self {
        Self { api }
    }

    /// Provision a new instance. All three identifiers must already be
    /// resolved; names are never passed here.
    ///
    /// The returned snapshot reflects what the API reports, not what
    /// was requested — echoed identifiers may be in normalized form.
    pub async fn create_instance(
        &self,
        name: &str,
        service_offering_id: &str,
        template_id: &str,
        zone_id: &str,
    ) -> Result<InstanceSnapshot> {
        tracing::info!(name, zone_id, template_id, service_offering_id, "deploying instance");

        self.api
            .deploy_instance(name, service_offering_id, template_id, zone_id)
            .await
            .map_err(|e| CloudError::Provision(e.to_string()))
    }

    /// Fetch the current remote state of a previously created instance.
    pub async fn fetch_instance(&self, id: &str) -> Result<InstanceSnapshot> {
        if id.is_empty() {
            return Err(CloudError::Precondition("instance id is required".into()));
        }

        match self.api.instance_by_id(id).await {
            Ok(Some(snapshot)) => Ok(snapshot),
            Ok(None) => Err(CloudError::NotFound {
                kind: ResourceKind::Instance,
                name: id.to_string(),
            }),
            Err(e) => Err(CloudError::Transport(e.to_string())),
        }
    }

    /// Rename an instance. Does not refetch; callers that need the new
    /// remote state must fetch it themselves afterwards.
    pub async fn rename_instance(&self, id: &str, new_name: &str) -> Result<()> {
        if id.is_empty() {
            return Err(CloudError::Precondition("instance id is required".into()));
        }

        tracing::info!(id, new_name, "renaming instance");

        self.api
            .update_instance(id, Some(new_name))
            .await
            .map_err(|e| CloudError::Update(e.to_string()))
    }

    /// List instances, optionally narrowed by a name filter that is
    /// passed through to the remote API unchanged.
    pub async fn list_instances(&self, filter: Option<&str>) -> Result<Vec<InstanceSnapshot>> {
        self.api
            .list_instances(filter)
            .await
            .map_err(|e| CloudError::Transport(e.to_string()))
    }

    /// Deletion is unsupported. Fails immediately; no remote call.
    pub async fn delete_instance(&self, _id: &str) -> Result<()> {
        Err(CloudError::NotImplemented(
            "instance deletion is not supported".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubApi;

    #[tokio::test]
    async fn create_returns_what_the_api_reports() {
        let api = StubApi::new()
            .with_zone("z-1", "zone-1")
            .with_template("tpl-1", "ubuntu-24")
            .with_service_offering("so-1", "small");
        let lifecycle = InstanceLifecycle::new(&api);

        let snapshot = lifecycle
            .create_instance("vm1", "so-1", "tpl-1", "z-1")
            .await
            .unwrap();

        assert_eq!(snapshot.id, "i-1");
        assert_eq!(snapshot.service_offering_id, "so-1");
        assert_eq!(snapshot.template_id, "tpl-1");
        assert_eq!(snapshot.zone_id, "z-1");
    }

    #[tokio::test]
    async fn fetch_unknown_id_is_not_found() {
        let api = StubApi::new();
        let lifecycle = InstanceLifecycle::new(&api);

        let err = lifecycle.fetch_instance("i-404").await.unwrap_err();
        assert!(matches!(
            err,
            CloudError::NotFound {
                kind: ResourceKind::Instance,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn fetch_transport_failure_is_transport_error() {
        let api = StubApi::new();
        api.fail_next("instance_by_id", "gateway timeout");
        let lifecycle = InstanceLifecycle::new(&api);

        let err = lifecycle.fetch_instance("i-1").await.unwrap_err();
        assert!(matches!(err, CloudError::Transport(_)));
    }

    #[tokio::test]
    async fn rename_with_empty_id_never_reaches_the_api() {
        let api = StubApi::new();
        let lifecycle = InstanceLifecycle::new(&api);

        let err = lifecycle.rename_instance("", "vm2").await.unwrap_err();
        assert!(matches!(err, CloudError::Precondition(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_is_not_implemented_and_makes_no_remote_call() {
        let api = StubApi::new();
        let lifecycle = InstanceLifecycle::new(&api);

        let err = lifecycle.delete_instance("i-1").await.unwrap_err();
        assert!(matches!(err, CloudError::NotImplemented(_)));
        assert!(api.calls().is_empty());
    }
}
