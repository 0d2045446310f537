//! Market Smart Contract Library
//!
//! Static description of the contracts the marketplace talks to and the two
//! codecs that sit on either side of a contract call:
//!
//! - [`encoding`] turns caller-supplied JSON arguments into typed [`ScVal`]s,
//!   validated against the method's declared parameters.
//! - [`ResultCodec`] turns the tagged wire result of a call back into a typed
//!   value or a contract error resolved through the contract's error table.
//!
//! [`ScVal`]: market_core::ScVal

pub mod bindings;
pub mod codec;
pub mod convert;
pub mod encoding;
pub mod manifest;
pub mod registry;

pub use codec::{CodecError, ContractResult, ResultCodec};
pub use convert::{Bytes, FromScVal};
pub use encoding::{encode_args, encode_value, EncodingError};
pub use manifest::{ContractSpec, ErrorTable, MethodSpec, ParameterSpec, ScType};
pub use registry::{ContractRegistry, ResolvedMethod};
