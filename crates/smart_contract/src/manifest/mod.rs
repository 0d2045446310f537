//! Contract manifest types.
//!
//! A manifest is the fixed, per-contract schema the client was generated
//! against: method names, parameter and return types, and the table that maps
//! contract error codes to symbolic names.

pub mod contract_spec;
pub mod error_table;
pub mod method_spec;
pub mod sc_type;

pub use contract_spec::ContractSpec;
pub use error_table::ErrorTable;
pub use method_spec::{MethodSpec, ParameterSpec};
pub use sc_type::ScType;
