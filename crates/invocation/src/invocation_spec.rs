use indexmap::IndexMap;
use market_core::Address;
use serde_json::Value;
use std::time::Duration;

/// Optional per-request overrides of the configured fee and validity window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvocationOptions {
    pub base_fee: Option<u32>,
    pub valid_for: Option<Duration>,
}

/// Immutable description of one contract call
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationSpec {
    contract: Address,
    method: String,
    args: IndexMap<String, Value>,
    identity: Address,
    options: InvocationOptions,
}

impl InvocationSpec {
    pub fn new(contract: Address, method: impl Into<String>, identity: Address) -> Self {
        Self {
            contract,
            method: method.into(),
            args: IndexMap::new(),
            identity,
            options: InvocationOptions::default(),
        }
    }

    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    pub fn with_args(mut self, args: IndexMap<String, Value>) -> Self {
        self.args = args;
        self
    }

    pub fn with_base_fee(mut self, fee: u32) -> Self {
        self.options.base_fee = Some(fee);
        self
    }

    pub fn with_validity(mut self, valid_for: Duration) -> Self {
        self.options.valid_for = Some(valid_for);
        self
    }

    pub fn contract(&self) -> &Address {
        &self.contract
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &IndexMap<String, Value> {
        &self.args
    }

    /// Account expected to sign the call
    pub fn identity(&self) -> &Address {
        &self.identity
    }

    pub fn options(&self) -> &InvocationOptions {
        &self.options
    }
}
