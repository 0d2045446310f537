//! Marketplace actions expressed as invocations of the bundled contracts.
//!
//! Each function validates and normalizes user input, then returns the
//! [`InvocationSpec`] to hand to an [`Operation`](crate::Operation).

use crate::InvocationSpec;
use market_core::Address;
use market_smart_contract::bindings::{dj_nft, factory};
use market_smart_contract::EncodingError;
use serde_json::json;

/// Longest asset code accepted for a stellar asset contract
pub const MAX_ASSET_CODE_LEN: usize = 12;

/// Input for a new NFT collection, as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionParams {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
}

/// Input for a new fungible token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungibleParams {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

/// Mints the reward NFT to `identity`
pub fn claim_reward(reward_contract: Address, identity: Address) -> InvocationSpec {
    InvocationSpec::new(reward_contract, dj_nft::AWARD_ITEM, identity)
        .arg("to", identity.to_strkey())
}

/// Deploys an NFT collection owned by `owner`.
///
/// Fields are trimmed and the symbol is upper-cased.
pub fn create_collection(
    factory_contract: Address,
    owner: Address,
    params: &CollectionParams,
) -> Result<InvocationSpec, EncodingError> {
    let name = required("name", &params.name)?;
    let symbol = required("symbol", &params.symbol)?.to_uppercase();
    let base_uri = required("base_uri", &params.base_uri)?;

    Ok(
        InvocationSpec::new(factory_contract, factory::CREATE_NFT, owner)
            .arg("owner", owner.to_strkey())
            .arg("name", name)
            .arg("symbol", symbol)
            .arg("base_uri", base_uri),
    )
}

pub fn create_fungible(
    factory_contract: Address,
    owner: Address,
    params: &FungibleParams,
) -> Result<InvocationSpec, EncodingError> {
    let name = required("name", &params.name)?;
    let symbol = required("symbol", &params.symbol)?.to_uppercase();

    Ok(
        InvocationSpec::new(factory_contract, factory::CREATE_FUNGIBLE, owner)
            .arg("owner", owner.to_strkey())
            .arg("decimals", json!(params.decimals))
            .arg("name", name)
            .arg("symbol", symbol),
    )
}

/// Deploys the stellar asset contract for `asset_code` issued by `issuer`
pub fn deploy_asset_contract(
    factory_contract: Address,
    issuer: Address,
    asset_code: &str,
) -> Result<InvocationSpec, EncodingError> {
    let serialized = serialize_asset(asset_code.trim(), &issuer)?;

    Ok(
        InvocationSpec::new(factory_contract, factory::DEPLOY_SAC, issuer)
            .arg("issuer", issuer.to_strkey())
            .arg("serialized_asset", hex::encode(serialized)),
    )
}

/// Serializes a credit asset: type discriminant, zero-padded code and the
/// issuer's ed25519 key, all integers big-endian.
pub fn serialize_asset(code: &str, issuer: &Address) -> Result<Vec<u8>, EncodingError> {
    let invalid = |reason: &str| EncodingError::Invalid {
        arg: "asset_code".to_string(),
        reason: reason.to_string(),
    };
    if code.is_empty() || code.len() > MAX_ASSET_CODE_LEN {
        return Err(invalid("must be 1 to 12 characters"));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid("must contain only ASCII letters and digits"));
    }
    if !issuer.is_account() {
        return Err(EncodingError::Invalid {
            arg: "issuer".to_string(),
            reason: "must be an account".to_string(),
        });
    }

    let (asset_type, width) = if code.len() <= 4 { (1u32, 4) } else { (2u32, 12) };
    let mut out = Vec::with_capacity(4 + width + 4 + 32);
    out.extend_from_slice(&asset_type.to_be_bytes());
    out.extend_from_slice(code.as_bytes());
    out.resize(4 + width, 0);
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(issuer.key());
    Ok(out)
}

fn required(arg: &str, value: &str) -> Result<String, EncodingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EncodingError::Invalid {
            arg: arg.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}
