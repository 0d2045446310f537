// Copyright (C) 2024-2025 The Market Project.
//
// codec.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Tagged contract result codec.
//!
//! Wire layout: one tag byte followed by the body.
//!
//! | tag  | body                                   |
//! |------|----------------------------------------|
//! | 0x00 | bincode-encoded [`ScVal`] success payload |
//! | 0x01 | big-endian `u32` contract error code   |
//!
//! Any other tag, a payload that does not match the method's declared return
//! type, or an error code missing from the contract's error table is a
//! [`CodecError::Decode`]: the client's bindings no longer describe the
//! deployed contract. So is an error tag from a method not declared
//! fallible. Only a known error code is a [`CodecError::Contract`].
//!
//! Payloads are bounded: at most [`MAX_RESULT_BYTES`], no trailing bytes, and
//! no deeper than [`market_core::value::MAX_DEPTH`] levels of nesting.

use crate::{ErrorTable, FromScVal, MethodSpec};
use bincode::Options;
use market_core::ScVal;
use thiserror::Error;

/// Largest success payload accepted from a node, in bytes
pub const MAX_RESULT_BYTES: u64 = 1024 * 1024;

const OK_TAG: u8 = 0x00;
const ERR_TAG: u8 = 0x01;

/// Result value returned by a contract call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractResult {
    Ok(ScVal),
    Err(u32),
}

/// Result decoding failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The contract rejected the call with a known error code
    #[error("Contract error {code}: {name}")]
    Contract { code: u32, name: String },

    /// The response does not match the schema the client was built against
    #[error("Decode error: {0}")]
    Decode(String),
}

impl CodecError {
    pub fn decode(reason: impl Into<String>) -> Self {
        CodecError::Decode(reason.into())
    }
}

/// Encoder/decoder for tagged contract results
pub struct ResultCodec;

fn payload_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_RESULT_BYTES)
        .reject_trailing_bytes()
}

impl ResultCodec {
    pub fn encode(result: &ContractResult) -> Result<Vec<u8>, CodecError> {
        match result {
            ContractResult::Ok(value) => {
                let body = payload_options()
                    .serialize(value)
                    .map_err(|e| CodecError::decode(e.to_string()))?;
                let mut raw = Vec::with_capacity(body.len() + 1);
                raw.push(OK_TAG);
                raw.extend_from_slice(&body);
                Ok(raw)
            }
            ContractResult::Err(code) => {
                let mut raw = Vec::with_capacity(5);
                raw.push(ERR_TAG);
                raw.extend_from_slice(&code.to_be_bytes());
                Ok(raw)
            }
        }
    }

    /// Splits the raw result into its tag and body without consulting any schema
    pub fn decode_raw(raw: &[u8]) -> Result<ContractResult, CodecError> {
        let (tag, body) = raw
            .split_first()
            .ok_or_else(|| CodecError::decode("empty result"))?;

        match *tag {
            OK_TAG => payload_options()
                .deserialize(body)
                .map(ContractResult::Ok)
                .map_err(|e| CodecError::decode(format!("malformed payload: {}", e))),
            ERR_TAG => {
                let code: [u8; 4] = body.try_into().map_err(|_| {
                    CodecError::decode(format!("error body must be 4 bytes, got {}", body.len()))
                })?;
                Ok(ContractResult::Err(u32::from_be_bytes(code)))
            }
            other => Err(CodecError::decode(format!("unrecognized result tag 0x{:02x}", other))),
        }
    }

    /// Decodes a raw result against the method's declared return type
    pub fn decode(raw: &[u8], method: &MethodSpec, errors: &ErrorTable) -> Result<ScVal, CodecError> {
        match Self::decode_raw(raw)? {
            ContractResult::Ok(value) => {
                if method.output.matches(&value) {
                    Ok(value)
                } else {
                    Err(CodecError::decode(format!(
                        "`{}` returned {} where {} was declared",
                        method.name,
                        value.type_name(),
                        method.output
                    )))
                }
            }
            ContractResult::Err(code) if method.fallible => Err(Self::contract_error(code, errors)),
            ContractResult::Err(code) => Err(CodecError::decode(format!(
                "`{}` is not declared fallible but returned error code {}",
                method.name, code
            ))),
        }
    }

    /// Decodes and converts the payload into a native type
    pub fn decode_as<T: FromScVal>(
        raw: &[u8],
        method: &MethodSpec,
        errors: &ErrorTable,
    ) -> Result<T, CodecError> {
        let value = Self::decode(raw, method, errors)?;
        T::from_sc_val(&value)
    }

    /// Resolves an error code through the contract's error table
    pub fn contract_error(code: u32, errors: &ErrorTable) -> CodecError {
        match errors.name(code) {
            Some(name) => CodecError::Contract {
                code,
                name: name.to_string(),
            },
            None => CodecError::decode(format!("error code {} is not in the contract's error table", code)),
        }
    }
}
