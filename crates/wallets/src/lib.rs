//! Market Wallets Library
//!
//! Signing for contract invocations:
//! - [`SignerGateway`], the boundary the invocation pipeline signs through
//! - [`KeyPair`], an ed25519 account key
//! - [`LocalSigner`], which signs immediately with a held key
//! - [`WalletBridge`], which forwards requests to an interactive wallet
//!   that approves or rejects each one

pub mod bridge;
pub mod key_pair;
pub mod local_signer;
pub mod signer;

pub use bridge::{SignRequest, WalletBridge};
pub use key_pair::KeyPair;
pub use local_signer::LocalSigner;
pub use signer::{SignerError, SignerGateway, SigningContext};

use thiserror::Error;

/// Result type for key operations
pub type Result<T> = std::result::Result<T, Error>;

/// Key handling errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}
