//! Market Invocation Library
//!
//! Turns a user intent into a signed, submitted and confirmed contract call
//! and reports exactly one terminal [`InvocationOutcome`] per run.
//!
//! - [`InvocationBuilder`] resolves the method, encodes arguments and
//!   simulates the call
//! - [`InvocationOrchestrator`] drives one run through signing, submission
//!   and confirmation
//! - [`Operation`] is the observable, single-flight binding consumers hold
//!   per logical action
//! - [`actions`] builds specs for the marketplace's own contracts

pub mod actions;
pub mod builder;
pub mod invocation_spec;
pub mod operation;
pub mod orchestrator;
pub mod outcome;
mod token;

pub use builder::{BuildError, BuiltInvocation, InvocationBuilder};
pub use invocation_spec::{InvocationOptions, InvocationSpec};
pub use operation::{Operation, OperationError};
pub use orchestrator::{InvocationOrchestrator, NetworkContext};
pub use outcome::{InvocationOutcome, OperationState, Progress, Stage, Status};

pub use tokio_util::sync::CancellationToken;
