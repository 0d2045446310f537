// Copyright (C) 2024-2025 The Market Project.
//
// address.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Account and contract identities in strkey form.
//!
//! A strkey is a version byte, a 32-byte key and a CRC16-XModem checksum,
//! rendered as 56 characters of unpadded RFC 4648 base32. Accounts start
//! with `G`, contracts with `C`.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const STRKEY_LEN: usize = 56;
const ACCOUNT_VERSION: u8 = 6 << 3;
const CONTRACT_VERSION: u8 = 2 << 3;

/// Kind of entity an address refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressKind {
    /// An externally owned account (`G...`)
    Account,
    /// A deployed contract (`C...`)
    Contract,
}

impl AddressKind {
    fn version_byte(self) -> u8 {
        match self {
            AddressKind::Account => ACCOUNT_VERSION,
            AddressKind::Contract => CONTRACT_VERSION,
        }
    }

    fn from_version_byte(byte: u8) -> Option<Self> {
        match byte {
            ACCOUNT_VERSION => Some(AddressKind::Account),
            CONTRACT_VERSION => Some(AddressKind::Contract),
            _ => None,
        }
    }
}

/// An account or contract address
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    kind: AddressKind,
    key: [u8; 32],
}

impl Address {
    /// Account address for an ed25519 public key
    pub fn account(key: [u8; 32]) -> Self {
        Self {
            kind: AddressKind::Account,
            key,
        }
    }

    /// Contract address for a contract id
    pub fn contract(id: [u8; 32]) -> Self {
        Self {
            kind: AddressKind::Contract,
            key: id,
        }
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn key(&self) -> &[u8; 32] {
        &self.key
    }

    pub fn is_account(&self) -> bool {
        self.kind == AddressKind::Account
    }

    pub fn is_contract(&self) -> bool {
        self.kind == AddressKind::Contract
    }

    /// Encodes the address as a strkey
    pub fn to_strkey(&self) -> String {
        let mut payload = Vec::with_capacity(35);
        payload.push(self.kind.version_byte());
        payload.extend_from_slice(&self.key);
        let checksum = crc16_xmodem(&payload);
        payload.extend_from_slice(&checksum.to_le_bytes());
        base32_encode(&payload)
    }

    /// Parses a strkey
    pub fn parse(value: &str) -> Result<Self> {
        if value.len() != STRKEY_LEN {
            return Err(Error::InvalidAddress(format!(
                "expected {} characters, got {}",
                STRKEY_LEN,
                value.len()
            )));
        }

        let payload = base32_decode(value)
            .ok_or_else(|| Error::InvalidAddress(format!("not base32: {}", value)))?;
        if payload.len() != 35 {
            return Err(Error::InvalidAddress(format!(
                "decoded length {} is not 35",
                payload.len()
            )));
        }

        let kind = AddressKind::from_version_byte(payload[0]).ok_or_else(|| {
            Error::InvalidAddress(format!("unknown version byte 0x{:02x}", payload[0]))
        })?;

        let expected = crc16_xmodem(&payload[..33]);
        let actual = u16::from_le_bytes([payload[33], payload[34]]);
        if expected != actual {
            return Err(Error::InvalidAddress(format!("checksum mismatch: {}", value)));
        }

        let mut key = [0u8; 32];
        key.copy_from_slice(&payload[1..33]);
        Ok(Self { kind, key })
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Address::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_strkey())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Address::parse(&value).map_err(serde::de::Error::custom)
    }
}

fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8 + 4) / 5);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for &byte in data {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(BASE32_ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }

    if bits > 0 {
        out.push(BASE32_ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

fn base32_decode(value: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(value.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for c in value.bytes() {
        let digit = BASE32_ALPHABET.iter().position(|&a| a == c)? as u32;
        buffer = (buffer << 5) | digit;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }
    Some(out)
}
