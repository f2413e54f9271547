//! Identifier resolver
//!
//! Translates human-readable names (zone, template, service offering)
//! into the opaque identifiers the API assigns, via exact-name list
//! queries. Resolution is read-only and never cached: every call hits
//! the API again.

use crate::api::{ApiResult, CloudApi};
use crate::error::{CloudError, Result};
use crate::model::{NamedRecord, ResourceKind};

/// Name-to-id resolver over an injected transport.
pub struct Resolver<'a> {
    api: &'a dyn CloudApi,
}

impl<'a> Resolver<'a> {
    pub fn new(api: &'a dyn CloudApi) -> Self {
        Self { api }
    }

    /// Resolve a zone name to its id.
    pub async fn resolve_zone(&self, name: &str) -> Result<String> {
        let records = self.api.list_zones(name).await;
        first_match(ResourceKind::Zone, name, records)
    }

    /// Resolve a template name to its id.
    pub async fn resolve_template(&self, name: &str) -> Result<String> {
        let records = self.api.list_templates(name).await;
        first_match(ResourceKind::Template, name, records)
    }

    /// Resolve a service offering name to its id.
    pub async fn resolve_service_offering(&self, name: &str) -> Result<String> {
        let records = self.api.list_service_offerings(name).await;
        first_match(ResourceKind::ServiceOffering, name, records)
    }
}

/// Pick the winning record for a lookup.
///
/// When several remote entities share a name the first record in API
/// order wins; no tie-break is applied beyond that.
fn first_match(kind: ResourceKind, name: &str, records: ApiResult<Vec<NamedRecord>>) -> Result<String> {
    let records = records.map_err(|e| CloudError::Lookup {
        kind,
        name: name.to_string(),
        message: e.to_string(),
    })?;

    match records.first() {
        Some(record) => {
            tracing::debug!(%kind, name, id = %record.id, "resolved");
            Ok(record.id.clone())
        }
        None => Err(CloudError::NotFound {
            kind,
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubApi;

    #[tokio::test]
    async fn resolves_single_zone_match() {
        let api = StubApi::new().with_zone("z-123", "zone-1");
        let resolver = Resolver::new(&api);

        let id = resolver.resolve_zone("zone-1").await.unwrap();
        assert_eq!(id, "z-123");
    }

    #[tokio::test]
    async fn zero_matches_is_not_found() {
        let api = StubApi::new();
        let resolver = Resolver::new(&api);

        let err = resolver.resolve_zone("zone-1").await.unwrap_err();
        match err {
            CloudError::NotFound { kind, name } => {
                assert_eq!(kind, ResourceKind::Zone);
                assert_eq!(name, "zone-1");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn first_record_wins_on_duplicate_names() {
        let api = StubApi::new()
            .with_template("tpl-a", "ubuntu-24")
            .with_template("tpl-b", "ubuntu-24");
        let resolver = Resolver::new(&api);

        let id = resolver.resolve_template("ubuntu-24").await.unwrap();
        assert_eq!(id, "tpl-a");
    }

    #[tokio::test]
    async fn transport_failure_wraps_kind_and_name() {
        let api = StubApi::new();
        api.fail_next("list_service_offerings", "connection reset");
        let resolver = Resolver::new(&api);

        let err = resolver.resolve_service_offering("small").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to look up service offering 'small': connection reset"
        );
    }
}
