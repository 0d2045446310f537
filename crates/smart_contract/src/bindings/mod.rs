//! Bundled bindings for the marketplace's own contracts.

pub mod dj_nft;
pub mod factory;

pub use factory::{FungibleMetadata, RegistryEntry, TokenType};
