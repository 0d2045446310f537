// Copyright (C) 2024-2025 The Market Project.
//
// signer.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use async_trait::async_trait;
use market_core::{Address, NetworkId, SignedEnvelope, UnsignedEnvelope};
use thiserror::Error;

/// Who is expected to sign, and for which network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    pub identity: Address,
    pub network: NetworkId,
    pub network_passphrase: String,
}

impl SigningContext {
    pub fn new(identity: Address, network_passphrase: impl Into<String>) -> Self {
        let network_passphrase = network_passphrase.into();
        Self {
            identity,
            network: NetworkId::from_passphrase(&network_passphrase),
            network_passphrase,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    /// The user declined the request
    #[error("signing request rejected")]
    Rejected,

    /// No signer could service the request
    #[error("signer unavailable: {0}")]
    Unavailable(String),

    #[error("wallet is connected to '{actual}', expected '{expected}'")]
    NetworkMismatch { expected: String, actual: String },
}

/// Obtains signatures from whoever holds the identity's key.
///
/// Implementations may wait for human approval for an unbounded time; callers
/// apply their own timeout. The unsigned envelope is consumed.
#[async_trait]
pub trait SignerGateway: Send + Sync {
    async fn sign(
        &self,
        envelope: UnsignedEnvelope,
        context: &SigningContext,
    ) -> Result<SignedEnvelope, SignerError>;
}
