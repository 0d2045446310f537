// Copyright (C) 2024-2025 The Market Project.
//
// rpc_simulate_result.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::{Deserialize, Serialize};

/// CPU and memory cost reported by simulation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RpcCost {
    pub cpu_insns: String,
    pub mem_bytes: String,
}

/// Ledger footprint reported by simulation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RpcFootprint {
    pub read_bytes: u32,
    pub write_bytes: u32,
}

/// One invocation result; `xdr` is the base64 tagged result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcSimulateEntry {
    pub xdr: String,
}

/// Result of `simulateTransaction`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RpcSimulateResult {
    #[serde(default)]
    pub min_resource_fee: Option<String>,

    #[serde(default)]
    pub cost: Option<RpcCost>,

    #[serde(default)]
    pub footprint: Option<RpcFootprint>,

    #[serde(default)]
    pub results: Vec<RpcSimulateEntry>,

    /// Present when the host rejected the call
    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub latest_ledger: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_failure_without_cost() {
        let result: RpcSimulateResult =
            serde_json::from_str(r#"{"error":"HostError: trapped","latestLedger":12}"#).unwrap();
        assert_eq!(result.error.as_deref(), Some("HostError: trapped"));
        assert!(result.cost.is_none());
        assert!(result.results.is_empty());
        assert_eq!(result.latest_ledger, Some(12));
    }
}
