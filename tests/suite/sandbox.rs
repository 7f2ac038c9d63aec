//! Sandbox showcase routes through the runner

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::json;
use tenant_fetch_transport::TransportError;
use tenant_fetch_types::{OutcomeState, SandboxRoutes, Uuid};

use crate::common::{mount_item, runner_for, start_tenant_mock};

const SANDBOX: Uuid = Uuid::from_u128(0x5a4d_b0c5_0000_4000_8000_0000_0000_0001);
const FABER: Uuid = Uuid::from_u128(0x0fab_e700_0000_4000_8000_0000_0000_0002);

#[derive(Debug, Deserialize, PartialEq)]
struct Lob {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct CredentialRead {
    attrs: BTreeMap<String, String>,
    cred_def_id: String,
    schema_id: String,
}

#[tokio::test]
async fn lob_is_decoded_from_item() {
    let server = start_tenant_mock().await;
    let routes = SandboxRoutes::new(SANDBOX);
    mount_item(
        &server,
        &routes.lob(FABER).address(),
        json!({"id": FABER.to_string(), "name": "Faber", "wallet_id": "w-1"}),
    )
    .await;

    let runner = runner_for(&server);
    let mut outcome = OutcomeState::new();
    let lob: Option<Lob> = runner
        .run_as(&routes.lob(FABER), &mut outcome)
        .await
        .unwrap();

    assert_eq!(
        lob,
        Some(Lob {
            id: FABER.to_string(),
            name: "Faber".to_string(),
        })
    );
    assert!(!outcome.is_loading());
}

#[tokio::test]
async fn credentials_list_is_decoded() {
    let server = start_tenant_mock().await;
    let routes = SandboxRoutes::new(SANDBOX);
    mount_item(
        &server,
        &routes.credentials(FABER).address(),
        json!([{
            "attrs": {"degree": "Maths", "name": "Alice"},
            "cred_def_id": "cd:1",
            "schema_id": "s:1"
        }]),
    )
    .await;

    let runner = runner_for(&server);
    let mut outcome = OutcomeState::new();
    let creds: Vec<CredentialRead> = runner
        .run_as(&routes.credentials(FABER), &mut outcome)
        .await
        .unwrap()
        .unwrap_or_default();

    assert_eq!(creds.len(), 1);
    assert_eq!(creds[0].cred_def_id, "cd:1");
    assert_eq!(creds[0].attrs.get("degree").map(String::as_str), Some("Maths"));
}

#[tokio::test]
async fn payload_shape_mismatch_is_reported_on_both_channels() {
    let server = start_tenant_mock().await;
    let routes = SandboxRoutes::new(SANDBOX);
    mount_item(&server, &routes.lob(FABER).address(), json!("not a lob")).await;

    let runner = runner_for(&server);
    let mut outcome = OutcomeState::new();
    let err = runner
        .run_as::<Lob, _>(&routes.lob(FABER), &mut outcome)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Payload(_)));
    assert!(matches!(outcome.error(), Some(TransportError::Payload(_))));
    assert!(!outcome.is_loading());
}

#[tokio::test]
async fn unknown_lob_is_a_404() {
    let server = start_tenant_mock().await;
    let routes = SandboxRoutes::new(SANDBOX);

    let runner = runner_for(&server);
    let mut outcome = OutcomeState::new();
    let err = runner
        .run(&routes.out_of_band_messages(FABER), &mut outcome)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(
        err.address(),
        Some(routes.out_of_band_messages(FABER).address().as_str())
    );
    assert_eq!(outcome.error().and_then(TransportError::status), Some(404));
}
