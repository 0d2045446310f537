// Copyright (C) 2024-2025 The Market Project.
//
// key_pair.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::{Error, Result};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use market_core::{Address, DecoratedSignature, TxHash};
use rand::rngs::OsRng;
use std::fmt;
use zeroize::Zeroizing;

/// An ed25519 account key
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    pub fn from_private_key(private_key: &[u8]) -> Result<Self> {
        let bytes: [u8; 32] = private_key
            .try_into()
            .map_err(|_| Error::InvalidPrivateKey)?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&bytes),
        })
    }

    /// Parses a 64-character hex secret
    pub fn from_secret_hex(secret: &str) -> Result<Self> {
        let bytes = Zeroizing::new(hex::decode(secret.trim())?);
        Self::from_private_key(&bytes)
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Account address derived from the public key
    pub fn address(&self) -> Address {
        Address::account(self.public_key())
    }

    /// Last four bytes of the public key, used by verifiers to pick the key
    pub fn hint(&self) -> [u8; 4] {
        let public_key = self.public_key();
        [public_key[28], public_key[29], public_key[30], public_key[31]]
    }

    pub fn sign(&self, hash: &TxHash) -> DecoratedSignature {
        let signature = self.signing_key.sign(hash.as_bytes());
        DecoratedSignature {
            hint: self.hint(),
            signature: signature.to_bytes().to_vec(),
        }
    }

    pub fn verify(&self, hash: &TxHash, signature: &DecoratedSignature) -> bool {
        verify(&self.address(), hash, signature)
    }
}

/// Checks a decorated signature against an account address
pub fn verify(account: &Address, hash: &TxHash, signature: &DecoratedSignature) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(account.key()) else {
        return false;
    };
    let Ok(sig) = Signature::from_slice(&signature.signature) else {
        return false;
    };
    key.verify(hash.as_bytes(), &sig).is_ok()
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for KeyPair {}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({})", self.address())
    }
}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address())
    }
}
