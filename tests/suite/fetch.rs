//! End-to-end fetch-and-report over HTTP

use serde_json::json;
use tenant_fetch_transport::TransportError;
use tenant_fetch_types::{OutcomeState, QueryParams, RequestDescriptor};
use tokio::sync::watch;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{mount_item, mount_status, runner_for, start_tenant_mock};

#[tokio::test]
async fn user_scenario_resolves_to_item() {
    let server = start_tenant_mock().await;
    mount_item(&server, "/users/7", json!({"id": 7, "name": "Al"})).await;

    let runner = runner_for(&server);
    let mut outcome = OutcomeState::new();
    let payload = runner
        .run(&RequestDescriptor::new("/users/", "7"), &mut outcome)
        .await
        .unwrap();

    assert_eq!(payload, Some(json!({"id": 7, "name": "Al"})));
    assert!(outcome.error().is_none());
    assert!(!outcome.is_loading());
}

#[tokio::test]
async fn server_error_is_raised_and_recorded() {
    let server = start_tenant_mock().await;
    mount_status(&server, "/users/7", 500, json!({"code": 500})).await;

    let runner = runner_for(&server);
    let mut outcome = OutcomeState::new();
    let err = runner
        .run(&RequestDescriptor::new("/users/", "7"), &mut outcome)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    match outcome.error() {
        Some(TransportError::Status { status, body, .. }) => {
            assert_eq!(*status, 500);
            assert_eq!(body, r#"{"code":500}"#);
        }
        other => panic!("expected recorded Status error, got {other:?}"),
    }
    assert!(!outcome.is_loading());
}

#[tokio::test]
async fn body_without_item_is_lenient() {
    let server = start_tenant_mock().await;
    mount_status(&server, "/lobs", 200, json!({"items": []})).await;

    let runner = runner_for(&server);
    let mut outcome = OutcomeState::new();
    let payload = runner
        .run(&RequestDescriptor::new("/", "lobs"), &mut outcome)
        .await
        .unwrap();

    assert_eq!(payload, None);
    assert!(outcome.error().is_none());
    assert!(!outcome.is_loading());
}

#[tokio::test]
async fn query_parameters_are_forwarded() {
    let server = start_tenant_mock().await;
    Mock::given(method("GET"))
        .and(path("/items/42"))
        .and(query_param("expand", "owner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item": {"id": 42}})))
        .expect(1)
        .mount(&server)
        .await;

    let runner = runner_for(&server);
    let mut outcome = OutcomeState::new();
    let descriptor = RequestDescriptor::new("/items/", "42")
        .with_query(QueryParams::new().with("expand", "owner"));
    let payload = runner.run(&descriptor, &mut outcome).await.unwrap();

    assert_eq!(payload, Some(json!({"id": 42})));
}

#[tokio::test]
async fn retry_by_caller_clears_previous_error() {
    let server = start_tenant_mock().await;
    mount_status(&server, "/flaky/1", 503, json!({})).await;
    mount_item(&server, "/stable/1", json!("ok")).await;

    let runner = runner_for(&server);
    let mut outcome = OutcomeState::new();

    assert!(
        runner
            .run(&RequestDescriptor::new("/flaky/", "1"), &mut outcome)
            .await
            .is_err()
    );
    assert!(outcome.error().is_some());

    outcome.begin();
    let payload = runner
        .run(&RequestDescriptor::new("/stable/", "1"), &mut outcome)
        .await
        .unwrap();

    assert_eq!(payload, Some(json!("ok")));
    assert!(outcome.error().is_none());
    assert!(!outcome.is_loading());
}

#[tokio::test]
async fn watch_receivers_observe_completion() {
    let server = start_tenant_mock().await;
    mount_item(&server, "/users/7", json!({"id": 7})).await;

    let runner = runner_for(&server);
    let (mut tx, mut rx) = watch::channel(OutcomeState::<TransportError>::new());
    assert!(rx.borrow().is_loading());

    runner
        .run(&RequestDescriptor::new("/users/", "7"), &mut tx)
        .await
        .unwrap();

    assert!(rx.has_changed().unwrap());
    let state = rx.borrow_and_update();
    assert!(!state.is_loading());
    assert!(state.error().is_none());
}
