// Copyright (C) 2024-2025 The Market Project.
//
// contract_spec.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::{ErrorTable, MethodSpec};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Schema of one deployed contract
#[derive(Debug, Clone, Default)]
pub struct ContractSpec {
    pub name: String,
    methods: BTreeMap<String, Arc<MethodSpec>>,
    errors: ErrorTable,
}

impl ContractSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: BTreeMap::new(),
            errors: ErrorTable::new(),
        }
    }

    pub fn with_method(mut self, method: MethodSpec) -> Self {
        self.methods.insert(method.name.clone(), Arc::new(method));
        self
    }

    pub fn with_errors(mut self, errors: ErrorTable) -> Self {
        self.errors = errors;
        self
    }

    pub fn method(&self, name: &str) -> Option<&Arc<MethodSpec>> {
        self.methods.get(name)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodSpec> {
        self.methods.values().map(|m| m.as_ref())
    }

    pub fn errors(&self) -> &ErrorTable {
        &self.errors
    }
}
