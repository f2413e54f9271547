//! End-to-end workflow tests against the in-memory transport stub.

use stratus_cloud::testing::StubApi;
use stratus_cloud::{CloudError, Instance, InstanceSpec, Reconciler, ResourceKind};

fn stub_with_catalog() -> StubApi {
    StubApi::new()
        .with_zone("z-1", "zone-1")
        .with_template("tpl-1", "ubuntu-24")
        .with_service_offering("so-1", "small")
}

fn spec() -> InstanceSpec {
    InstanceSpec::new("vm1", "zone-1", "ubuntu-24", "small")
}

#[tokio::test]
async fn create_deploys_with_resolved_ids_and_persists_the_echo() {
    let api = stub_with_catalog();
    let reconciler = Reconciler::new(&api);

    let observed = reconciler.create(&spec()).await.unwrap();

    assert_eq!(observed.id, "i-1");
    assert_eq!(observed.name, "vm1");
    // Declared names survive untouched; ids are what the API echoed.
    assert_eq!(observed.zone, "zone-1");
    assert_eq!(observed.zone_id, "z-1");
    assert_eq!(observed.template_id, "tpl-1");
    assert_eq!(observed.service_offering_id, "so-1");

    assert_eq!(
        api.calls(),
        vec![
            "list_zones",
            "list_templates",
            "list_service_offerings",
            "deploy_instance",
        ]
    );
}

#[tokio::test]
async fn resolution_failure_means_no_deploy_call() {
    // Catalog has the zone and offering but not the template.
    let api = StubApi::new()
        .with_zone("z-1", "zone-1")
        .with_service_offering("so-1", "small");
    let reconciler = Reconciler::new(&api);

    let err = reconciler.create(&spec()).await.unwrap_err();
    assert!(matches!(
        err,
        CloudError::NotFound {
            kind: ResourceKind::Template,
            ..
        }
    ));
    assert!(!api.calls().iter().any(|c| c == "deploy_instance"));
}

#[tokio::test]
async fn resolution_failures_surface_in_zone_template_offering_order() {
    // Nothing resolves; the zone failure must win.
    let api = StubApi::new();
    let reconciler = Reconciler::new(&api);

    let err = reconciler.create(&spec()).await.unwrap_err();
    assert!(matches!(
        err,
        CloudError::NotFound {
            kind: ResourceKind::Zone,
            ..
        }
    ));
    // The gate is hard: later lookups were never attempted.
    assert_eq!(api.calls(), vec!["list_zones"]);
}

#[tokio::test]
async fn read_overwrites_everything_except_the_identifier() {
    let api = stub_with_catalog();
    let reconciler = Reconciler::new(&api);
    let created = reconciler.create(&spec()).await.unwrap();

    // Simulate an out-of-band rename observed on the next read.
    api.fail_next("update_instance", "unused"); // guard: read must not update
    let prior = Instance {
        name: "stale-name".into(),
        ..created.clone()
    };

    let observed = reconciler.read(&prior).await.unwrap();
    assert_eq!(observed.id, created.id);
    assert_eq!(observed.name, "vm1");
    assert_eq!(observed.zone, "zone-1");
    assert!(!api.calls().iter().any(|c| c == "update_instance"));
}

#[tokio::test]
async fn read_failure_does_not_produce_a_record() {
    let api = stub_with_catalog();
    let reconciler = Reconciler::new(&api);
    let created = reconciler.create(&spec()).await.unwrap();

    api.fail_next("instance_by_id", "gateway timeout");
    let err = reconciler.read(&created).await.unwrap_err();
    assert!(matches!(err, CloudError::Transport(_)));
}

#[tokio::test]
async fn update_with_empty_id_is_a_local_precondition_failure() {
    let api = stub_with_catalog();
    let reconciler = Reconciler::new(&api);

    let prior = Instance::default();
    let err = reconciler.update(&prior, &spec()).await.unwrap_err();

    assert!(matches!(err, CloudError::Precondition(_)));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn rename_failure_aborts_before_the_refetch() {
    let api = stub_with_catalog();
    let reconciler = Reconciler::new(&api);
    let created = reconciler.create(&spec()).await.unwrap();

    api.fail_next("update_instance", "permission denied");
    let desired = InstanceSpec::new("vm1-renamed", "zone-1", "ubuntu-24", "small");
    let err = reconciler.update(&created, &desired).await.unwrap_err();

    assert!(matches!(err, CloudError::Update(_)));
    assert!(!api.calls().iter().skip(4).any(|c| c == "instance_by_id"));
    // Remote name is unchanged.
    assert_eq!(api.instance(&created.id).unwrap().name, "vm1");
}

#[tokio::test]
async fn refetch_failure_after_rename_leaves_the_remote_renamed() {
    let api = stub_with_catalog();
    let reconciler = Reconciler::new(&api);
    let created = reconciler.create(&spec()).await.unwrap();

    api.fail_next("instance_by_id", "gateway timeout");
    let desired = InstanceSpec::new("vm1-renamed", "zone-1", "ubuntu-24", "small");
    let err = reconciler.update(&created, &desired).await.unwrap_err();
    assert!(matches!(err, CloudError::Transport(_)));

    // The remote system kept the rename; an independent read sees it.
    let observed = reconciler.read(&created).await.unwrap();
    assert_eq!(observed.name, "vm1-renamed");
    assert_eq!(observed.id, created.id);
}

#[tokio::test]
async fn successful_update_persists_the_refetched_state() {
    let api = stub_with_catalog();
    let reconciler = Reconciler::new(&api);
    let created = reconciler.create(&spec()).await.unwrap();

    let desired = InstanceSpec::new("vm1-renamed", "zone-1", "ubuntu-24", "small");
    let observed = reconciler.update(&created, &desired).await.unwrap();

    assert_eq!(observed.id, created.id);
    assert_eq!(observed.name, "vm1-renamed");
    assert_eq!(observed.zone_id, "z-1");
}

#[tokio::test]
async fn delete_is_terminal_and_touches_nothing() {
    let api = stub_with_catalog();
    let reconciler = Reconciler::new(&api);
    let created = reconciler.create(&spec()).await.unwrap();
    let calls_before = api.calls().len();

    let err = reconciler.delete(&created).await.unwrap_err();
    assert!(matches!(err, CloudError::NotImplemented(_)));
    assert_eq!(api.calls().len(), calls_before);

    // The instance is still there.
    assert!(api.instance(&created.id).is_some());
}
