// Copyright (C) 2024-2025 The Market Project.
//
// rpc_exception.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use std::fmt;
use thiserror::Error;

/// Invalid JSON was received
pub const PARSE_ERROR: i32 = -32700;
/// Internal JSON-RPC error
pub const INTERNAL_ERROR: i32 = -32603;
/// The request never produced a response (connection, timeout, HTTP status)
pub const TRANSPORT_ERROR: i32 = -32099;
/// The node refused to accept a transaction
pub const SUBMISSION_REJECTED: i32 = -32098;

/// RPC exception carrying a JSON-RPC error code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct RpcException {
    /// Error code
    pub code: i32,

    /// Error message
    pub message: String,
}

impl RpcException {
    /// Creates a new RPC exception
    pub fn new(code: i32, message: String) -> Self {
        Self { code, message }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(PARSE_ERROR, message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(TRANSPORT_ERROR, message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(SUBMISSION_REJECTED, message.into())
    }

    /// Whether the failure happened below the JSON-RPC layer
    pub fn is_transport(&self) -> bool {
        self.code == TRANSPORT_ERROR
    }
}

impl fmt::Display for RpcException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
