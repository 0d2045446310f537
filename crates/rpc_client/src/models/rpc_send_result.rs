// Copyright (C) 2024-2025 The Market Project.
//
// rpc_send_result.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::{Deserialize, Serialize};

/// Node-side status of a freshly sent transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SendStatus {
    Pending,
    Duplicate,
    TryAgainLater,
    Error,
}

impl SendStatus {
    /// Whether the node holds the transaction and it can be polled
    pub fn is_accepted(self) -> bool {
        matches!(self, SendStatus::Pending | SendStatus::Duplicate)
    }
}

/// Result of `sendTransaction`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RpcSendResult {
    pub hash: String,
    pub status: SendStatus,

    #[serde(default)]
    pub latest_ledger: Option<u64>,

    #[serde(default)]
    pub error_result_xdr: Option<String>,
}
