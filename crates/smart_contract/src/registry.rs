// Copyright (C) 2024-2025 The Market Project.
//
// registry.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Lookup from contract address to its schema.

use crate::{ContractSpec, EncodingError, MethodSpec};
use market_core::Address;
use std::collections::HashMap;
use std::sync::Arc;

/// A method resolved against the registry, with its contract's error table
#[derive(Debug, Clone)]
pub struct ResolvedMethod {
    pub contract: Arc<ContractSpec>,
    pub method: Arc<MethodSpec>,
}

/// Static registry of known contracts, shared read-only across runs
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    contracts: HashMap<Address, Arc<ContractSpec>>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, address: Address, spec: ContractSpec) {
        self.contracts.insert(address, Arc::new(spec));
    }

    pub fn with_contract(mut self, address: Address, spec: ContractSpec) -> Self {
        self.register(address, spec);
        self
    }

    pub fn get(&self, address: &Address) -> Option<&Arc<ContractSpec>> {
        self.contracts.get(address)
    }

    pub fn resolve(&self, address: &Address, method: &str) -> Result<ResolvedMethod, EncodingError> {
        let contract = self
            .contracts
            .get(address)
            .ok_or_else(|| EncodingError::UnknownContract(address.to_string()))?;
        let method_spec = contract
            .method(method)
            .ok_or_else(|| EncodingError::UnknownMethod(method.to_string()))?;
        Ok(ResolvedMethod {
            contract: contract.clone(),
            method: method_spec.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MethodSpec, ScType};

    #[test]
    fn resolves_known_method() {
        let address = Address::contract([5; 32]);
        let registry = ContractRegistry::new().with_contract(
            address,
            ContractSpec::new("demo").with_method(MethodSpec::new("ping").returns(ScType::Bool)),
        );

        let resolved = registry.resolve(&address, "ping").unwrap();
        assert_eq!(resolved.contract.name, "demo");
        assert_eq!(resolved.method.output, ScType::Bool);

        assert!(matches!(
            registry.resolve(&address, "pong"),
            Err(EncodingError::UnknownMethod(name)) if name == "pong"
        ));
        assert!(matches!(
            registry.resolve(&Address::contract([6; 32]), "ping"),
            Err(EncodingError::UnknownContract(_))
        ));
    }
}
