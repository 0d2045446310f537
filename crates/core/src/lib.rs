//! Market Core Library
//!
//! Shared types for the contract-invocation pipeline: account and contract
//! identities, network identifiers, typed contract values and the
//! unsigned/signed transaction envelopes exchanged with wallets and RPC nodes.

pub mod address;
pub mod envelope;
pub mod error;
pub mod network;
pub mod value;

pub use address::{Address, AddressKind};
pub use envelope::{
    DecoratedSignature, HostInvocation, ResourceFootprint, SignedEnvelope, TransactionBody,
    TxHash, UnsignedEnvelope,
};
pub use error::{Error, Result};
pub use network::NetworkId;
pub use value::ScVal;
