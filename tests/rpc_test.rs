//! Node RPC client and dataset loading against a mock node

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use nanoscope::app::App;
use nanoscope::domain::account::{KnownAccount, RepresentativeRecord};
use nanoscope::domain::ConfirmationQuorum;
use nanoscope::infrastructure::nano::{LedgerSource, NanoRpc, RpcError};
use nanoscope::infrastructure::runtime::{load_datasets, RuntimeBridge, RuntimeCommand, RuntimeEvent};
use nanoscope::store::KnownAccountStore;

const REP: &str = "nano_3arg3asgtigae3xckabaaewkx3bzsh7nwz7jkmjos79ihyaxwphhm6qgjps4";

#[tokio::test]
async fn test_representatives_online_parses_weights() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .body_contains("representatives_online");
            then.status(200).json_body(json!({
                "representatives": {
                    REP: { "weight": "1000000000000000000000000000000000" },
                    "nano_1small": { "weight": "5" }
                }
            }));
        })
        .await;

    let rpc = NanoRpc::new(server.url("/"), None).unwrap();
    let records = rpc.representatives().await.unwrap();
    mock.assert_async().await;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].account, REP);
    assert_eq!(records[0].weight, 1_000_000_000_000_000_000_000_000_000_000_000);
    assert_eq!(records[1].weight, 5);
}

#[tokio::test]
async fn test_confirmation_quorum_reads_min_weight() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/").body_contains("confirmation_quorum");
            then.status(200).json_body(json!({
                "quorum_delta": "41469707173777717318245825935516662250",
                "online_stake_total": "61000000000000000000000000000000000000",
                "principal_representative_min_weight": "61000000000000000000000000000000000"
            }));
        })
        .await;

    let rpc = NanoRpc::new(server.url("/"), None).unwrap();
    let quorum = rpc.confirmation_quorum().await.unwrap();
    assert_eq!(
        quorum.principal_representative_min_weight,
        61_000_000_000_000_000_000_000_000_000_000_000
    );
}

#[tokio::test]
async fn test_node_error_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200).json_body(json!({ "error": "RPC control is disabled" }));
        })
        .await;

    let rpc = NanoRpc::new(server.url("/"), None).unwrap();
    match rpc.representatives().await {
        Err(RpcError::Node { action, message }) => {
            assert_eq!(action, "representatives_online");
            assert_eq!(message, "RPC control is disabled");
        }
        other => panic!("expected node error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_status_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(503);
        })
        .await;

    let rpc = NanoRpc::new(server.url("/"), None).unwrap();
    assert!(matches!(
        rpc.confirmation_quorum().await,
        Err(RpcError::Status { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_known_accounts_registry() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/known.json");
            then.status(200).json_body(json!([
                { "account": format!(" {REP} "), "alias": "Nano Foundation #1" },
                { "account": "xrb_1legacy", "alias": "Legacy" },
                { "account": "nano_1blank", "alias": "  " }
            ]));
        })
        .await;

    let rpc = NanoRpc::new(server.url("/"), Some(server.url("/known.json"))).unwrap();
    let known = rpc.known_accounts().await.unwrap();
    assert_eq!(
        known,
        Some(vec![
            KnownAccount {
                account: REP.into(),
                alias: "Nano Foundation #1".into(),
            },
            KnownAccount {
                account: "nano_1legacy".into(),
                alias: "Legacy".into(),
            },
        ])
    );

    let without_registry = NanoRpc::new(server.url("/"), None).unwrap();
    assert_eq!(without_registry.known_accounts().await.unwrap(), None);
}

struct FixedSource {
    registry: Option<Vec<KnownAccount>>,
}

#[async_trait::async_trait]
impl LedgerSource for FixedSource {
    async fn representatives(&self) -> Result<Vec<RepresentativeRecord>, RpcError> {
        Ok(vec![RepresentativeRecord {
            account: REP.into(),
            weight: 100,
        }])
    }

    async fn confirmation_quorum(&self) -> Result<ConfirmationQuorum, RpcError> {
        Err(RpcError::MissingField("principal_representative_min_weight".into()))
    }

    async fn known_accounts(&self) -> Result<Option<Vec<KnownAccount>>, RpcError> {
        Ok(self.registry.clone())
    }

    fn endpoint_name(&self) -> String {
        "fixed".into()
    }
}

#[tokio::test]
async fn test_load_datasets_reports_each_result() {
    let (tx, rx) = mpsc::channel();
    let source = FixedSource {
        registry: Some(Vec::new()),
    };
    load_datasets(&source, &tx).await;
    let events: Vec<RuntimeEvent> = rx.try_iter().collect();

    assert_eq!(events[0], RuntimeEvent::RepresentativesLoading);
    assert!(matches!(
        &events[1],
        RuntimeEvent::RepresentativesReady { records } if records.len() == 1
    ));
    assert!(matches!(&events[2], RuntimeEvent::Error { message } if message.starts_with("Quorum")));
    assert_eq!(
        events[3],
        RuntimeEvent::KnownAccountsReady {
            accounts: Vec::new()
        }
    );
}

#[tokio::test]
async fn test_unconfigured_registry_sends_no_update() {
    let (tx, rx) = mpsc::channel();
    load_datasets(&FixedSource { registry: None }, &tx).await;
    let events: Vec<RuntimeEvent> = rx.try_iter().collect();

    assert_eq!(events.len(), 3);
    assert!(!events
        .iter()
        .any(|event| matches!(event, RuntimeEvent::KnownAccountsReady { .. })));
}

#[tokio::test]
async fn test_cached_registry_survives_reload_without_registry_url() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("known_accounts.sqlite3");
    let mut store = KnownAccountStore::open(&db).unwrap();
    store
        .replace_registry(&[KnownAccount {
            account: REP.into(),
            alias: "Cached rep".into(),
        }])
        .unwrap();

    let mut app = App::new(REP);
    app.attach_store(store).unwrap();
    assert_eq!(app.header.alias(), Some("Cached rep"));

    let (tx, rx) = mpsc::channel();
    load_datasets(&FixedSource { registry: None }, &tx).await;
    for event in rx.try_iter() {
        app.apply_event(event);
    }
    assert_eq!(app.header.alias(), Some("Cached rep"));

    let reopened = KnownAccountStore::open(&db).unwrap();
    assert_eq!(reopened.load_registry().unwrap().len(), 1);
}

#[test]
fn test_bridge_loads_on_start_and_on_refresh() {
    let bridge = RuntimeBridge::new(
        Arc::new(FixedSource {
            registry: Some(Vec::new()),
        }),
        None,
    );

    let mut loads = 0;
    let mut seen = Vec::new();
    while loads < 1 {
        let event = bridge
            .recv_timeout(Duration::from_secs(5))
            .expect("initial load");
        if matches!(event, RuntimeEvent::KnownAccountsReady { .. }) {
            loads += 1;
        }
        seen.push(event);
    }
    assert_eq!(seen[0], RuntimeEvent::RepresentativesLoading);

    bridge.send(RuntimeCommand::Refresh).unwrap();
    let event = bridge
        .recv_timeout(Duration::from_secs(5))
        .expect("refresh");
    assert_eq!(event, RuntimeEvent::RepresentativesLoading);
}
