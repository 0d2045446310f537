// Copyright (C) 2024-2025 The Market Project.
//
// envelope.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Transaction envelopes.
//!
//! An [`UnsignedEnvelope`] is the opaque payload handed to a signer; a
//! [`SignedEnvelope`] is that payload with signatures attached. Neither is
//! `Clone`: the unsigned form is consumed by signing and the signed form by
//! submission, so a signed payload cannot be re-derived or resubmitted by
//! accident.

use crate::{Address, Error, NetworkId, Result, ScVal};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Contract call carried by a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInvocation {
    pub contract: Address,
    pub method: String,
    pub args: Vec<ScVal>,
}

/// Resource footprint reported by simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFootprint {
    pub instructions: u64,
    pub read_bytes: u32,
    pub write_bytes: u32,
    pub resource_fee: i64,
}

/// Body of a transaction before it is serialized into an envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBody {
    pub source: Address,
    pub sequence: u64,
    pub fee: u32,
    /// Unix timestamp after which the network rejects the transaction
    pub valid_until: u64,
    pub invocation: HostInvocation,
    pub resources: Option<ResourceFootprint>,
}

/// Hash identifying a submitted transaction
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash([u8; 32]);

impl TxHash {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    fn digest(network: &NetworkId, payload: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(network.as_bytes());
        hasher.update(payload);
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&hasher.finalize());
        Self(hash)
    }
}

impl FromStr for TxHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim_start_matches("0x"))?;
        let hash: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::InvalidHash(format!("expected 32 bytes: {}", s)))?;
        Ok(Self(hash))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", self.to_hex())
    }
}

/// Serialized, unsigned transaction
#[derive(PartialEq, Eq)]
pub struct UnsignedEnvelope {
    bytes: Vec<u8>,
}

impl UnsignedEnvelope {
    pub fn new(body: &TransactionBody) -> Result<Self> {
        Ok(Self {
            bytes: bincode::serialize(body)?,
        })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn body(&self) -> Result<TransactionBody> {
        Ok(bincode::deserialize(&self.bytes)?)
    }

    /// The hash a signer signs and the network reports back
    pub fn hash(&self, network: &NetworkId) -> TxHash {
        TxHash::digest(network, &self.bytes)
    }
}

impl fmt::Debug for UnsignedEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnsignedEnvelope({} bytes)", self.bytes.len())
    }
}

/// A signature together with the last four bytes of the signer's public key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratedSignature {
    pub hint: [u8; 4],
    pub signature: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
struct SignedWire {
    payload: Vec<u8>,
    signatures: Vec<DecoratedSignature>,
}

/// Unsigned payload plus the signatures attached by a signer
#[derive(PartialEq, Eq)]
pub struct SignedEnvelope {
    payload: Vec<u8>,
    signatures: Vec<DecoratedSignature>,
}

impl SignedEnvelope {
    pub fn new(unsigned: UnsignedEnvelope, signatures: Vec<DecoratedSignature>) -> Self {
        Self {
            payload: unsigned.bytes,
            signatures,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let wire: SignedWire = bincode::deserialize(bytes)?;
        Ok(Self {
            payload: wire.payload,
            signatures: wire.signatures,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let wire = SignedWire {
            payload: self.payload.clone(),
            signatures: self.signatures.clone(),
        };
        Ok(bincode::serialize(&wire)?)
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn signatures(&self) -> &[DecoratedSignature] {
        &self.signatures
    }

    pub fn body(&self) -> Result<TransactionBody> {
        Ok(bincode::deserialize(&self.payload)?)
    }

    /// Same hash as the unsigned envelope it was produced from
    pub fn hash(&self, network: &NetworkId) -> TxHash {
        TxHash::digest(network, &self.payload)
    }
}

impl fmt::Debug for SignedEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedEnvelope")
            .field("payload_len", &self.payload.len())
            .field("signatures", &self.signatures.len())
            .finish()
    }
}
