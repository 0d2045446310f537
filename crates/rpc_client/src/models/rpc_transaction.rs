// Copyright (C) 2024-2025 The Market Project.
//
// rpc_transaction.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    NotFound,
    Success,
    Failed,
}

/// Result of `getTransaction`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    pub status: TransactionStatus,

    /// Base64 tagged result; present once the transaction is applied
    #[serde(default)]
    pub return_value: Option<String>,

    #[serde(default)]
    pub ledger: Option<u64>,
}
