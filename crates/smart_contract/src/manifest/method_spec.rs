// Copyright (C) 2024-2025 The Market Project.
//
// method_spec.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::ScType;

/// A declared method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: ScType,
    /// Maximum byte length for string, symbol and bytes values
    pub max_len: Option<usize>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, ty: ScType) -> Self {
        Self {
            name: name.into(),
            ty,
            max_len: None,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }
}

/// A declared contract method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    pub name: String,
    pub inputs: Vec<ParameterSpec>,
    /// Type of the success payload
    pub output: ScType,
    /// Whether the method returns `Result<output, Error>`
    pub fallible: bool,
}

impl MethodSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            output: ScType::Void,
            fallible: false,
        }
    }

    pub fn input(mut self, param: ParameterSpec) -> Self {
        self.inputs.push(param);
        self
    }

    pub fn returns(mut self, output: ScType) -> Self {
        self.output = output;
        self
    }

    /// Marks the method as returning `Result<output, Error>`
    pub fn fallible(mut self) -> Self {
        self.fallible = true;
        self
    }
}
