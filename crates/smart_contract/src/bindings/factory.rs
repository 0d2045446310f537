// Copyright (C) 2024-2025 The Market Project.
//
// factory.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Token factory contract.
//!
//! Deploys fungible tokens, NFT collections and asset contracts, and keeps a
//! registry of everything it has deployed.

use crate::convert::field;
use crate::{CodecError, ContractSpec, ErrorTable, FromScVal, MethodSpec, ParameterSpec, ScType};
use market_core::{Address, ScVal};

pub const CONTRACT_NAME: &str = "factory";

pub const DEPLOY: &str = "deploy";
pub const DEPLOY_SAC: &str = "deploy_sac";
pub const CREATE_FUNGIBLE: &str = "create_fungible";
pub const CREATE_NFT: &str = "create_nft";
pub const GET_TOKEN_INFO: &str = "get_token_info";
pub const GET_ALL_TOKENS: &str = "get_all_tokens";
pub const GET_FUNGIBLE_METADATA: &str = "get_fungible_metadata";
pub const GET_FUNGIBLE_WASM: &str = "get_fungible_wasm";

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_SYMBOL_LEN: usize = 12;
pub const MAX_URI_LEN: usize = 256;

/// Kind of token recorded in the factory registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Sac = 0,
    Custom = 1,
    Fungible = 2,
    Nft = 3,
}

impl TokenType {
    pub fn sc_type() -> ScType {
        ScType::Enum(vec![
            ("Sac".to_string(), 0),
            ("Custom".to_string(), 1),
            ("Fungible".to_string(), 2),
            ("Nft".to_string(), 3),
        ])
    }
}

impl FromScVal for TokenType {
    fn from_sc_val(value: &ScVal) -> Result<Self, CodecError> {
        match value {
            ScVal::U32(0) => Ok(TokenType::Sac),
            ScVal::U32(1) => Ok(TokenType::Custom),
            ScVal::U32(2) => Ok(TokenType::Fungible),
            ScVal::U32(3) => Ok(TokenType::Nft),
            other => Err(CodecError::decode(format!("invalid token type {:?}", other))),
        }
    }
}

/// Registry record for a deployed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub issuer: Address,
    pub token_type: TokenType,
}

impl RegistryEntry {
    pub fn sc_type() -> ScType {
        ScType::Struct(vec![
            ("issuer".to_string(), ScType::Address),
            ("token_type".to_string(), TokenType::sc_type()),
        ])
    }
}

impl FromScVal for RegistryEntry {
    fn from_sc_val(value: &ScVal) -> Result<Self, CodecError> {
        Ok(Self {
            issuer: field(value, "issuer")?,
            token_type: field(value, "token_type")?,
        })
    }
}

/// Metadata of a fungible token deployed by the factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungibleMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    pub admin: Address,
}

impl FungibleMetadata {
    pub fn sc_type() -> ScType {
        ScType::Tuple(vec![ScType::String, ScType::String, ScType::U32, ScType::Address])
    }
}

impl FromScVal for FungibleMetadata {
    fn from_sc_val(value: &ScVal) -> Result<Self, CodecError> {
        match value {
            ScVal::Vec(items) if items.len() == 4 => Ok(Self {
                name: String::from_sc_val(&items[0])?,
                symbol: String::from_sc_val(&items[1])?,
                decimals: u32::from_sc_val(&items[2])?,
                admin: Address::from_sc_val(&items[3])?,
            }),
            other => Err(CodecError::decode(format!(
                "expected 4-tuple, got {}",
                other.type_name()
            ))),
        }
    }
}

pub fn errors() -> ErrorTable {
    ErrorTable::from_pairs(&[
        (0, "ContractInitialized"),
        (1, "ContractNotInitialized"),
        (2, "AmountMustBePositive"),
        (3, "UnauthorizedAccess"),
        (4, "TokenNotFound"),
        (5, "InvalidArgument"),
    ])
}

pub fn spec() -> ContractSpec {
    ContractSpec::new(CONTRACT_NAME)
        .with_errors(errors())
        .with_method(
            MethodSpec::new(DEPLOY)
                .input(ParameterSpec::new("wasm_hash", ScType::BytesN(32)))
                .input(ParameterSpec::new("salt", ScType::BytesN(32)))
                .input(ParameterSpec::new("constructor_args", ScType::vec(ScType::Any)))
                .input(ParameterSpec::new("token_type", TokenType::sc_type()))
                .returns(ScType::Address)
                .fallible(),
        )
        .with_method(
            MethodSpec::new(DEPLOY_SAC)
                .input(ParameterSpec::new("issuer", ScType::Address))
                .input(ParameterSpec::new("serialized_asset", ScType::Bytes))
                .returns(ScType::Address),
        )
        .with_method(
            MethodSpec::new(CREATE_FUNGIBLE)
                .input(ParameterSpec::new("owner", ScType::Address))
                .input(ParameterSpec::new("decimals", ScType::U32))
                .input(ParameterSpec::new("name", ScType::String).with_max_len(MAX_NAME_LEN))
                .input(ParameterSpec::new("symbol", ScType::String).with_max_len(MAX_SYMBOL_LEN))
                .returns(ScType::Address)
                .fallible(),
        )
        .with_method(
            MethodSpec::new(CREATE_NFT)
                .input(ParameterSpec::new("owner", ScType::Address))
                .input(ParameterSpec::new("name", ScType::String).with_max_len(MAX_NAME_LEN))
                .input(ParameterSpec::new("symbol", ScType::String).with_max_len(MAX_SYMBOL_LEN))
                .input(ParameterSpec::new("base_uri", ScType::String).with_max_len(MAX_URI_LEN))
                .returns(ScType::Address)
                .fallible(),
        )
        .with_method(
            MethodSpec::new(GET_TOKEN_INFO)
                .input(ParameterSpec::new("token_addr", ScType::Address))
                .returns(RegistryEntry::sc_type())
                .fallible(),
        )
        .with_method(
            MethodSpec::new(GET_ALL_TOKENS)
                .returns(ScType::vec(ScType::Address))
                .fallible(),
        )
        .with_method(
            MethodSpec::new(GET_FUNGIBLE_METADATA)
                .input(ParameterSpec::new("token_addr", ScType::Address))
                .returns(FungibleMetadata::sc_type()),
        )
        .with_method(
            MethodSpec::new(GET_FUNGIBLE_WASM)
                .returns(ScType::BytesN(32))
                .fallible(),
        )
}
