// Copyright (C) 2024-2025 The Market Project.
//
// rpc_client.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::models::{
    RpcAccount, RpcRequest, RpcResponse, RpcSendResult, RpcSimulateResult, RpcTransaction,
    TransactionStatus,
};
use crate::submission_client::{
    PollStatus, SimulationCost, SimulationResult, SubmissionClient, SubmissionHandle,
};
use crate::RpcException;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use market_core::{Address, SignedEnvelope, TxHash, UnsignedEnvelope};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

/// JSON-RPC client for a smart-contract node
pub struct RpcClient {
    base_address: Url,
    http_client: Client,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Creates a new RPC client with an optional per-request HTTP timeout
    pub fn new(url: Url, request_timeout: Option<Duration>) -> Result<Self, RpcException> {
        let mut builder = Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| RpcException::internal(format!("HTTP client error: {}", e)))?;
        Ok(Self::with_client(http_client, url))
    }

    /// Creates a new RPC client with an existing HTTP client
    pub fn with_client(client: Client, url: Url) -> Self {
        Self {
            base_address: url,
            http_client: client,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &Url {
        &self.base_address
    }

    fn as_rpc_request(&self, method: &str, params: Value) -> RpcRequest {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        RpcRequest::new(json!(id), method.to_string(), params)
    }

    fn as_rpc_response(content: &str, throw_on_error: bool) -> Result<RpcResponse, RpcException> {
        let mut response: RpcResponse = serde_json::from_str(content)
            .map_err(|e| RpcException::parse(format!("Invalid response: {}", e)))?;

        response.raw_response = Some(content.to_string());

        if let Some(ref error) = response.error {
            if throw_on_error {
                return Err(RpcException::new(error.code, error.message.clone()));
            }
        }

        Ok(response)
    }

    /// Sends an RPC request
    pub async fn send_async(
        &self,
        request: RpcRequest,
        throw_on_error: bool,
    ) -> Result<RpcResponse, RpcException> {
        trace!(target: "market::rpc", method = %request.method, "sending request");

        let response = self
            .http_client
            .post(self.base_address.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcException::transport(format!("HTTP error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcException::transport(format!("HTTP status {}", status)));
        }

        let content = response
            .text()
            .await
            .map_err(|e| RpcException::transport(format!("Failed to read response: {}", e)))?;

        Self::as_rpc_response(&content, throw_on_error)
    }

    /// Sends an RPC request and returns the result
    pub async fn rpc_send_async(&self, method: &str, params: Value) -> Result<Value, RpcException> {
        let request = self.as_rpc_request(method, params);
        let response = self.send_async(request, true).await?;
        response
            .result
            .ok_or_else(|| RpcException::internal("No result returned"))
    }

    async fn rpc_call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, RpcException> {
        let result = self.rpc_send_async(method, params).await?;
        serde_json::from_value(result)
            .map_err(|e| RpcException::parse(format!("{}: unexpected result: {}", method, e)))
    }

    /// Returns account details
    pub async fn get_account(&self, address: &Address) -> Result<RpcAccount, RpcException> {
        self.rpc_call("getAccount", json!({ "address": address.to_strkey() }))
            .await
    }

    pub async fn simulate_transaction(
        &self,
        envelope: &UnsignedEnvelope,
    ) -> Result<RpcSimulateResult, RpcException> {
        let transaction = general_purpose::STANDARD.encode(envelope.as_bytes());
        self.rpc_call("simulateTransaction", json!({ "transaction": transaction }))
            .await
    }

    pub async fn send_transaction(
        &self,
        envelope: &SignedEnvelope,
    ) -> Result<RpcSendResult, RpcException> {
        let bytes = envelope
            .to_bytes()
            .map_err(|e| RpcException::internal(e.to_string()))?;
        let transaction = general_purpose::STANDARD.encode(bytes);
        self.rpc_call("sendTransaction", json!({ "transaction": transaction }))
            .await
    }

    pub async fn get_transaction(&self, hash: &TxHash) -> Result<RpcTransaction, RpcException> {
        self.rpc_call("getTransaction", json!({ "hash": hash.to_hex() }))
            .await
    }
}

fn decode_base64(value: &str, context: &str) -> Result<Vec<u8>, RpcException> {
    general_purpose::STANDARD
        .decode(value)
        .map_err(|e| RpcException::parse(format!("{}: invalid base64: {}", context, e)))
}

fn parse_number<T: std::str::FromStr>(value: &str, context: &str) -> Result<T, RpcException> {
    value
        .parse()
        .map_err(|_| RpcException::parse(format!("{}: invalid number '{}'", context, value)))
}

fn into_simulation(result: RpcSimulateResult) -> Result<SimulationResult, RpcException> {
    let first = result
        .results
        .first()
        .map(|entry| decode_base64(&entry.xdr, "simulateTransaction"))
        .transpose()?;

    if let Some(message) = result.error {
        return Ok(SimulationResult::Failed {
            raw: first,
            message,
        });
    }

    let preview = first
        .ok_or_else(|| RpcException::parse("simulateTransaction: missing result"))?;
    let cost = result.cost.unwrap_or_default();
    let footprint = result.footprint.unwrap_or_default();
    let min_resource_fee = match result.min_resource_fee {
        Some(fee) => parse_number(&fee, "minResourceFee")?,
        None => 0,
    };
    let instructions = if cost.cpu_insns.is_empty() {
        0
    } else {
        parse_number(&cost.cpu_insns, "cpuInsns")?
    };

    Ok(SimulationResult::Success {
        cost: SimulationCost {
            instructions,
            read_bytes: footprint.read_bytes,
            write_bytes: footprint.write_bytes,
            min_resource_fee,
        },
        preview,
    })
}

#[async_trait]
impl SubmissionClient for RpcClient {
    async fn get_sequence(&self, account: &Address) -> Result<u64, RpcException> {
        self.get_account(account)
            .await?
            .sequence()
            .map_err(RpcException::parse)
    }

    async fn simulate(&self, envelope: &UnsignedEnvelope) -> Result<SimulationResult, RpcException> {
        let result = self.simulate_transaction(envelope).await?;
        into_simulation(result)
    }

    async fn submit(&self, envelope: SignedEnvelope) -> Result<SubmissionHandle, RpcException> {
        let result = self.send_transaction(&envelope).await?;
        if !result.status.is_accepted() {
            return Err(RpcException::rejected(format!(
                "transaction {} rejected with status {:?}",
                result.hash, result.status
            )));
        }
        let hash: TxHash = result
            .hash
            .parse()
            .map_err(|_| RpcException::parse(format!("invalid transaction hash '{}'", result.hash)))?;
        debug!(target: "market::rpc", %hash, status = ?result.status, "transaction accepted");
        Ok(SubmissionHandle {
            hash,
            latest_ledger: result.latest_ledger,
        })
    }

    async fn poll(&self, handle: &SubmissionHandle) -> Result<PollStatus, RpcException> {
        let tx = self.get_transaction(&handle.hash).await?;
        let raw = tx
            .return_value
            .as_deref()
            .map(|value| decode_base64(value, "getTransaction"))
            .transpose()?;
        match tx.status {
            TransactionStatus::NotFound => Ok(PollStatus::Pending),
            TransactionStatus::Success => raw
                .map(PollStatus::Success)
                .ok_or_else(|| RpcException::parse("getTransaction: missing returnValue")),
            TransactionStatus::Failed => {
                if raw.is_none() {
                    debug!(
                        target: "market::rpc",
                        hash = %handle.hash,
                        ledger = ?tx.ledger,
                        "transaction failed without a result"
                    );
                }
                Ok(PollStatus::Failure(raw))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RpcCost, RpcFootprint, RpcSimulateEntry};

    #[test]
    fn simulation_failure_keeps_raw_contract_error() {
        let result = RpcSimulateResult {
            error: Some("contract error".into()),
            results: vec![RpcSimulateEntry {
                xdr: general_purpose::STANDARD.encode([1u8, 0, 0, 0, 2]),
            }],
            ..Default::default()
        };
        assert_eq!(
            into_simulation(result).unwrap(),
            SimulationResult::Failed {
                raw: Some(vec![1, 0, 0, 0, 2]),
                message: "contract error".into()
            }
        );
    }

    #[test]
    fn simulation_success_maps_cost() {
        let result = RpcSimulateResult {
            min_resource_fee: Some("5120".into()),
            cost: Some(RpcCost {
                cpu_insns: "1000000".into(),
                mem_bytes: "2048".into(),
            }),
            footprint: Some(RpcFootprint {
                read_bytes: 100,
                write_bytes: 20,
            }),
            results: vec![RpcSimulateEntry {
                xdr: general_purpose::STANDARD.encode([0u8]),
            }],
            ..Default::default()
        };
        match into_simulation(result).unwrap() {
            SimulationResult::Success { cost, preview } => {
                assert_eq!(cost.instructions, 1_000_000);
                assert_eq!(cost.min_resource_fee, 5120);
                assert_eq!(cost.read_bytes, 100);
                assert_eq!(preview, vec![0]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rpc_error_is_raised() {
        let err = RpcClient::as_rpc_response(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid params"}}"#,
            true,
        )
        .unwrap_err();
        assert_eq!(err.code, -32602);
        assert!(!err.is_transport());
    }
}
