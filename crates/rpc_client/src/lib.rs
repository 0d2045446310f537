//! Market RPC Client Library
//!
//! The [`SubmissionClient`] boundary used by the invocation pipeline and a
//! JSON-RPC implementation of it over HTTP.

pub mod models;
mod rpc_client;
mod rpc_exception;
mod submission_client;

pub use rpc_client::RpcClient;
pub use rpc_exception::{
    RpcException, INTERNAL_ERROR, PARSE_ERROR, SUBMISSION_REJECTED, TRANSPORT_ERROR,
};
pub use submission_client::{
    PollStatus, SimulationCost, SimulationResult, SubmissionClient, SubmissionHandle,
};

// Re-export commonly used types
pub use models::{RpcRequest, RpcResponse, RpcResponseError};
