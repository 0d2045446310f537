//! # market-rs: contract-invocation orchestration
//!
//! Turns a user intent ("claim this reward", "create this collection") into a
//! signed, submitted and confirmed contract call, reporting exactly one
//! terminal outcome per request.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use market_rs::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn demo(settings: Settings, key: KeyPair) -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(RpcClient::new(settings.network.rpc_url()?, None)?);
//! let registry = ContractRegistry::new()
//!     .with_contract(settings.contract("dj_nft")?, bindings::dj_nft::spec());
//! let orchestrator = Arc::new(InvocationOrchestrator::new(
//!     client,
//!     Arc::new(LocalSigner::new(key.clone())),
//!     Arc::new(registry),
//!     settings.invocation.clone(),
//!     NetworkContext::new(settings.network.passphrase()),
//! ));
//!
//! let claim = Operation::<u32>::new(orchestrator);
//! claim.run(actions::claim_reward(settings.contract("dj_nft")?, key.address()))?;
//! let done = claim.finished().await;
//! println!("{:?}", done.outcome);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`] - addresses, network ids, typed values and envelopes
//! - [`config`] - network and pipeline settings
//! - [`smart_contract`] - contract schemas, argument encoding and result decoding
//! - [`rpc_client`] - simulation, submission and polling over JSON-RPC
//! - [`wallets`] - signer gateways
//! - [`invocation`] - the invocation pipeline and its observable binding

#![warn(rustdoc::missing_crate_level_docs)]

pub use market_config as config;
pub use market_core as core;
pub use market_invocation as invocation;
pub use market_rpc_client as rpc_client;
pub use market_smart_contract as smart_contract;
pub use market_wallets as wallets;

/// Common imports for building on the pipeline
pub mod prelude {
    pub use crate::config::{InvocationSettings, NetworkSettings, NetworkType, Settings};
    pub use crate::core::{Address, NetworkId, ScVal, TxHash};
    pub use crate::invocation::{
        actions, CancellationToken, InvocationOrchestrator, InvocationOutcome, InvocationSpec,
        NetworkContext, Operation, OperationState, Stage, Status,
    };
    pub use crate::rpc_client::{RpcClient, SubmissionClient};
    pub use crate::smart_contract::{bindings, ContractRegistry, FromScVal, ResultCodec};
    pub use crate::wallets::{KeyPair, LocalSigner, SignerGateway, WalletBridge};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
