use base64::{engine::general_purpose, Engine as _};
use market_core::{
    Address, DecoratedSignature, HostInvocation, SignedEnvelope, TransactionBody, TxHash,
    UnsignedEnvelope,
};
use market_rpc_client::{
    PollStatus, RpcClient, SimulationResult, SubmissionClient, SubmissionHandle,
    SUBMISSION_REJECTED,
};
use mockito::{Matcher, Server};
use serde_json::json;
use url::Url;

fn client_for(server: &Server) -> RpcClient {
    RpcClient::new(Url::parse(&server.url()).unwrap(), None).unwrap()
}

fn unsigned() -> UnsignedEnvelope {
    UnsignedEnvelope::new(&TransactionBody {
        source: Address::account([1; 32]),
        sequence: 8,
        fee: 100,
        valid_until: 0,
        invocation: HostInvocation {
            contract: Address::contract([2; 32]),
            method: "award_item".into(),
            args: vec![],
        },
        resources: None,
    })
    .unwrap()
}

fn signed() -> SignedEnvelope {
    SignedEnvelope::new(
        unsigned(),
        vec![DecoratedSignature {
            hint: [0; 4],
            signature: vec![9; 64],
        }],
    )
}

fn rpc_body(method: &str) -> Matcher {
    Matcher::PartialJson(json!({ "jsonrpc": "2.0", "method": method }))
}

#[tokio::test]
async fn get_sequence_parses_string_sequence() {
    let mut server = Server::new_async().await;
    let account = Address::account([1; 32]);
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "getAccount",
            "params": { "address": account.to_strkey() }
        })))
        .with_body(
            json!({
                "jsonrpc": "2.0", "id": 1,
                "result": { "id": account.to_strkey(), "sequence": "4294967301" }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    assert_eq!(client.get_sequence(&account).await.unwrap(), 4_294_967_301);
    mock.assert_async().await;
}

#[tokio::test]
async fn simulate_reports_contract_failure() {
    let mut server = Server::new_async().await;
    let raw = [1u8, 0, 0, 0, 2];
    server
        .mock("POST", "/")
        .match_body(rpc_body("simulateTransaction"))
        .with_body(
            json!({
                "jsonrpc": "2.0", "id": 1,
                "result": {
                    "error": "HostError: Error(Contract, #2)",
                    "results": [{ "xdr": general_purpose::STANDARD.encode(raw) }],
                    "latestLedger": 77
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    match client.simulate(&unsigned()).await.unwrap() {
        SimulationResult::Failed { raw: Some(bytes), message } => {
            assert_eq!(bytes, raw.to_vec());
            assert!(message.contains("#2"));
        }
        other => panic!("unexpected simulation {:?}", other),
    }
}

#[tokio::test]
async fn submit_returns_handle_for_pending() {
    let mut server = Server::new_async().await;
    let hash = "7f3a".repeat(16);
    server
        .mock("POST", "/")
        .match_body(rpc_body("sendTransaction"))
        .with_body(
            json!({
                "jsonrpc": "2.0", "id": 1,
                "result": { "hash": hash, "status": "PENDING", "latestLedger": 100 }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let handle = client.submit(signed()).await.unwrap();
    assert_eq!(handle.hash.to_hex(), hash);
    assert_eq!(handle.latest_ledger, Some(100));
}

#[tokio::test]
async fn submit_try_again_later_is_rejected() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .match_body(rpc_body("sendTransaction"))
        .with_body(
            json!({
                "jsonrpc": "2.0", "id": 1,
                "result": { "hash": "00".repeat(32), "status": "TRY_AGAIN_LATER" }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.submit(signed()).await.unwrap_err();
    assert_eq!(err.code, SUBMISSION_REJECTED);
}

#[tokio::test]
async fn poll_maps_not_found_to_pending() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .match_body(rpc_body("getTransaction"))
        .with_body(json!({ "jsonrpc": "2.0", "id": 1, "result": { "status": "NOT_FOUND" } }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let handle = SubmissionHandle {
        hash: TxHash::new([3; 32]),
        latest_ledger: None,
    };
    assert_eq!(client.poll(&handle).await.unwrap(), PollStatus::Pending);
}

#[tokio::test]
async fn poll_success_carries_return_value() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .match_body(rpc_body("getTransaction"))
        .with_body(
            json!({
                "jsonrpc": "2.0", "id": 1,
                "result": { "status": "SUCCESS", "returnValue": general_purpose::STANDARD.encode([0u8, 1]) }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let handle = SubmissionHandle {
        hash: TxHash::new([3; 32]),
        latest_ledger: None,
    };
    assert_eq!(client.poll(&handle).await.unwrap(), PollStatus::Success(vec![0, 1]));
}

#[tokio::test]
async fn failed_transaction_without_result_is_terminal() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .match_body(rpc_body("getTransaction"))
        .with_body(json!({ "jsonrpc": "2.0", "id": 1, "result": { "status": "FAILED", "ledger": 12 } }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let handle = SubmissionHandle {
        hash: TxHash::new([3; 32]),
        latest_ledger: None,
    };
    assert_eq!(client.poll(&handle).await.unwrap(), PollStatus::Failure(None));
}

#[tokio::test]
async fn failed_transaction_keeps_contract_result() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .match_body(rpc_body("getTransaction"))
        .with_body(
            json!({
                "jsonrpc": "2.0", "id": 1,
                "result": { "status": "FAILED", "returnValue": general_purpose::STANDARD.encode([1u8, 0, 0, 0, 3]) }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let handle = SubmissionHandle {
        hash: TxHash::new([3; 32]),
        latest_ledger: None,
    };
    assert_eq!(
        client.poll(&handle).await.unwrap(),
        PollStatus::Failure(Some(vec![1, 0, 0, 0, 3]))
    );
}

#[tokio::test]
async fn success_without_result_is_parse_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .match_body(rpc_body("getTransaction"))
        .with_body(json!({ "jsonrpc": "2.0", "id": 1, "result": { "status": "SUCCESS" } }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let handle = SubmissionHandle {
        hash: TxHash::new([3; 32]),
        latest_ledger: None,
    };
    let err = client.poll(&handle).await.unwrap_err();
    assert_eq!(err.code, market_rpc_client::PARSE_ERROR);
}

#[tokio::test]
async fn http_failure_is_transport_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(503)
        .create_async()
        .await;

    let client = client_for(&server);
    let handle = SubmissionHandle {
        hash: TxHash::new([3; 32]),
        latest_ledger: None,
    };
    assert!(client.poll(&handle).await.unwrap_err().is_transport());
}
