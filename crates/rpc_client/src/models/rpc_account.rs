// Copyright (C) 2024-2025 The Market Project.
//
// rpc_account.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::{Deserialize, Serialize};

/// Result of `getAccount`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcAccount {
    pub id: String,

    /// Sequence number; nodes send it as a decimal string
    pub sequence: String,
}

impl RpcAccount {
    pub fn sequence(&self) -> Result<u64, String> {
        self.sequence
            .parse()
            .map_err(|_| format!("invalid sequence '{}'", self.sequence))
    }
}
