//! JSON-RPC wire models.

mod rpc_account;
mod rpc_request;
mod rpc_response;
mod rpc_send_result;
mod rpc_simulate_result;
mod rpc_transaction;

pub use rpc_account::RpcAccount;
pub use rpc_request::RpcRequest;
pub use rpc_response::{RpcResponse, RpcResponseError};
pub use rpc_send_result::{RpcSendResult, SendStatus};
pub use rpc_simulate_result::{RpcCost, RpcFootprint, RpcSimulateEntry, RpcSimulateResult};
pub use rpc_transaction::{RpcTransaction, TransactionStatus};
