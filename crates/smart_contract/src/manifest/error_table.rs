// Copyright (C) 2024-2025 The Market Project.
//
// error_table.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use std::collections::BTreeMap;

/// Maps contract error codes to symbolic names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTable {
    entries: BTreeMap<u32, String>,
}

impl ErrorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(u32, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(code, name)| (*code, (*name).to_string()))
                .collect(),
        }
    }

    pub fn insert(&mut self, code: u32, name: impl Into<String>) {
        self.entries.insert(code, name.into());
    }

    pub fn name(&self, code: u32) -> Option<&str> {
        self.entries.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
