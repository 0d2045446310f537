// Copyright (C) 2024-2025 The Market Project.
//
// bridge.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Bridge to an interactive wallet.
//!
//! [`WalletBridge`] is the pipeline side: it forwards each unsigned envelope
//! as a [`SignRequest`] over a channel and waits for the answer. The wallet
//! side receives requests and answers each one with [`SignRequest::approve`]
//! or [`SignRequest::reject`]. Dropping a request without answering reports
//! the signer as unavailable.

use crate::{KeyPair, SignerError, SignerGateway, SigningContext};
use async_trait::async_trait;
use market_core::{SignedEnvelope, TxHash, UnsignedEnvelope};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// A pending request waiting for the wallet user's decision
pub struct SignRequest {
    envelope: UnsignedEnvelope,
    context: SigningContext,
    hash: TxHash,
    responder: oneshot::Sender<Result<SignedEnvelope, SignerError>>,
}

impl SignRequest {
    pub fn context(&self) -> &SigningContext {
        &self.context
    }

    /// Hash the wallet is being asked to sign
    pub fn hash(&self) -> &TxHash {
        &self.hash
    }

    pub fn envelope(&self) -> &UnsignedEnvelope {
        &self.envelope
    }

    /// Signs with `key` and answers the request
    pub fn approve(self, key: &KeyPair) {
        let answer = if key.address() == self.context.identity {
            let signature = key.sign(&self.hash);
            Ok(SignedEnvelope::new(self.envelope, vec![signature]))
        } else {
            Err(SignerError::Unavailable(format!(
                "wallet account {} does not match {}",
                key.address(),
                self.context.identity
            )))
        };
        if self.responder.send(answer).is_err() {
            debug!(target: "market::wallet", "approval arrived after requester left");
        }
    }

    pub fn reject(self) {
        if self.responder.send(Err(SignerError::Rejected)).is_err() {
            debug!(target: "market::wallet", "rejection arrived after requester left");
        }
    }
}

/// Signer gateway backed by an interactive wallet
#[derive(Clone)]
pub struct WalletBridge {
    requests: mpsc::Sender<SignRequest>,
    wallet_network: Arc<RwLock<String>>,
}

impl WalletBridge {
    /// Creates a bridge for a wallet currently connected to `wallet_passphrase`.
    /// The receiver is handed to the wallet side.
    pub fn channel(
        wallet_passphrase: impl Into<String>,
        capacity: usize,
    ) -> (Self, mpsc::Receiver<SignRequest>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let bridge = Self {
            requests: tx,
            wallet_network: Arc::new(RwLock::new(wallet_passphrase.into())),
        };
        (bridge, rx)
    }

    /// Records that the wallet switched networks
    pub fn set_wallet_network(&self, passphrase: impl Into<String>) {
        *self.wallet_network.write() = passphrase.into();
    }

    pub fn wallet_network(&self) -> String {
        self.wallet_network.read().clone()
    }
}

#[async_trait]
impl SignerGateway for WalletBridge {
    async fn sign(
        &self,
        envelope: UnsignedEnvelope,
        context: &SigningContext,
    ) -> Result<SignedEnvelope, SignerError> {
        let wallet_network = self.wallet_network();
        if wallet_network != context.network_passphrase {
            warn!(
                target: "market::wallet",
                expected = %context.network_passphrase,
                actual = %wallet_network,
                "wallet network mismatch"
            );
            return Err(SignerError::NetworkMismatch {
                expected: context.network_passphrase.clone(),
                actual: wallet_network,
            });
        }

        let (responder, answer) = oneshot::channel();
        let request = SignRequest {
            hash: envelope.hash(&context.network),
            envelope,
            context: context.clone(),
            responder,
        };
        debug!(target: "market::wallet", hash = %request.hash, "requesting signature");

        self.requests
            .send(request)
            .await
            .map_err(|_| SignerError::Unavailable("wallet disconnected".to_string()))?;

        answer
            .await
            .map_err(|_| SignerError::Unavailable("wallet closed the request".to_string()))?
    }
}
