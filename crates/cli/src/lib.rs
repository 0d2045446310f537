//! Market CLI
//!
//! Command-line consumer of the invocation pipeline.

pub mod args;
pub mod commands;
pub mod logging;
pub mod progress;
pub mod wallet;

pub use args::{CliArgs, Command};
