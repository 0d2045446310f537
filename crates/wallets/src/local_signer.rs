// Copyright (C) 2024-2025 The Market Project.
//
// local_signer.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::{KeyPair, SignerError, SignerGateway, SigningContext};
use async_trait::async_trait;
use market_core::{SignedEnvelope, UnsignedEnvelope};
use tracing::debug;

/// Signs every request immediately with a held key
pub struct LocalSigner {
    key: KeyPair,
}

impl LocalSigner {
    pub fn new(key: KeyPair) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &KeyPair {
        &self.key
    }
}

#[async_trait]
impl SignerGateway for LocalSigner {
    async fn sign(
        &self,
        envelope: UnsignedEnvelope,
        context: &SigningContext,
    ) -> Result<SignedEnvelope, SignerError> {
        if self.key.address() != context.identity {
            return Err(SignerError::Unavailable(format!(
                "no key held for {}",
                context.identity
            )));
        }
        let hash = envelope.hash(&context.network);
        debug!(target: "market::signer", %hash, "signing locally");
        let signature = self.key.sign(&hash);
        Ok(SignedEnvelope::new(envelope, vec![signature]))
    }
}
