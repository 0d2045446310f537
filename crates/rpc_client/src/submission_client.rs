// Copyright (C) 2024-2025 The Market Project.
//
// submission_client.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! The network boundary consumed by the invocation pipeline.

use crate::RpcException;
use async_trait::async_trait;
use market_core::{Address, SignedEnvelope, TxHash, UnsignedEnvelope};

/// Resource cost estimated by simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationCost {
    pub instructions: u64,
    pub read_bytes: u32,
    pub write_bytes: u32,
    pub min_resource_fee: i64,
}

/// Outcome of a side-effect-free dry run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationResult {
    /// The call would succeed; `preview` is the raw tagged result it would return
    Success { cost: SimulationCost, preview: Vec<u8> },
    /// The call would be rejected. `raw` carries the tagged contract error when
    /// the contract itself rejected it.
    Failed { raw: Option<Vec<u8>>, message: String },
}

/// Handle returned when the node accepts a signed envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionHandle {
    pub hash: TxHash,
    pub latest_ledger: Option<u64>,
}

/// Confirmation status of a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus {
    /// Not yet in a closed ledger; not an error
    Pending,
    /// Applied successfully; carries the raw tagged result
    Success(Vec<u8>),
    /// Applied and failed; carries the raw tagged result when the contract
    /// produced one. A failure without one (resource or sequence errors) is
    /// still terminal.
    Failure(Option<Vec<u8>>),
}

/// Network operations needed to build, submit and confirm an invocation.
///
/// `poll` is an idempotent read and may be retried by callers; `submit` must
/// never be retried automatically.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Current sequence number of an account
    async fn get_sequence(&self, account: &Address) -> Result<u64, RpcException>;

    /// Dry-runs an unsigned envelope
    async fn simulate(&self, envelope: &UnsignedEnvelope) -> Result<SimulationResult, RpcException>;

    /// Submits a signed envelope; consumes it so it cannot be sent twice locally
    async fn submit(&self, envelope: SignedEnvelope) -> Result<SubmissionHandle, RpcException>;

    /// Reads the confirmation status of a submitted transaction
    async fn poll(&self, handle: &SubmissionHandle) -> Result<PollStatus, RpcException>;
}
