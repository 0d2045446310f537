// Copyright (C) 2024-2025 The Market Project.
//
// value.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Typed contract values as they travel on the wire.

use crate::Address;
use serde::de::{self, DeserializeSeed, EnumAccess, SeqAccess, VariantAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Deepest `Vec`/`Map` nesting accepted when decoding a value
pub const MAX_DEPTH: usize = 64;

/// A contract value.
///
/// Arguments are encoded into this form before simulation and results are
/// decoded out of it after confirmation.
///
/// Decoding rejects values nested deeper than [`MAX_DEPTH`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ScVal {
    Void,
    Bool(bool),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    U128(u128),
    I128(i128),
    Bytes(Vec<u8>),
    String(String),
    Symbol(String),
    Address(Address),
    Vec(Vec<ScVal>),
    Map(Vec<(ScVal, ScVal)>),
}

impl ScVal {
    /// Short name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ScVal::Void => "void",
            ScVal::Bool(_) => "bool",
            ScVal::U32(_) => "u32",
            ScVal::I32(_) => "i32",
            ScVal::U64(_) => "u64",
            ScVal::I64(_) => "i64",
            ScVal::U128(_) => "u128",
            ScVal::I128(_) => "i128",
            ScVal::Bytes(_) => "bytes",
            ScVal::String(_) => "string",
            ScVal::Symbol(_) => "symbol",
            ScVal::Address(_) => "address",
            ScVal::Vec(_) => "vec",
            ScVal::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScVal::String(s) | ScVal::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&Address> {
        match self {
            ScVal::Address(address) => Some(address),
            _ => None,
        }
    }

    /// Looks up a symbol-keyed entry in a map value
    pub fn map_get(&self, key: &str) -> Option<&ScVal> {
        match self {
            ScVal::Map(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(variant_identifier)]
enum Tag {
    Void,
    Bool,
    U32,
    I32,
    U64,
    I64,
    U128,
    I128,
    Bytes,
    String,
    Symbol,
    Address,
    Vec,
    Map,
}

const VARIANTS: &[&str] = &[
    "Void", "Bool", "U32", "I32", "U64", "I64", "U128", "I128", "Bytes", "String", "Symbol",
    "Address", "Vec", "Map",
];

// Preallocation cap; length prefixes come from the peer.
const MAX_PREALLOC: usize = 1024;

impl<'de> Deserialize<'de> for ScVal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Nested { depth: 0 }.deserialize(deserializer)
    }
}

/// Decodes one value at a given nesting depth
#[derive(Clone, Copy)]
struct Nested {
    depth: usize,
}

impl Nested {
    fn child<E: de::Error>(self) -> Result<Nested, E> {
        if self.depth >= MAX_DEPTH {
            return Err(E::custom(format!("value nested deeper than {} levels", MAX_DEPTH)));
        }
        Ok(Nested {
            depth: self.depth + 1,
        })
    }
}

impl<'de> DeserializeSeed<'de> for Nested {
    type Value = ScVal;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<ScVal, D::Error> {
        deserializer.deserialize_enum("ScVal", VARIANTS, self)
    }
}

impl<'de> Visitor<'de> for Nested {
    type Value = ScVal;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a contract value")
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<ScVal, A::Error> {
        let (tag, variant) = data.variant::<Tag>()?;
        Ok(match tag {
            Tag::Void => {
                variant.unit_variant()?;
                ScVal::Void
            }
            Tag::Bool => ScVal::Bool(variant.newtype_variant()?),
            Tag::U32 => ScVal::U32(variant.newtype_variant()?),
            Tag::I32 => ScVal::I32(variant.newtype_variant()?),
            Tag::U64 => ScVal::U64(variant.newtype_variant()?),
            Tag::I64 => ScVal::I64(variant.newtype_variant()?),
            Tag::U128 => ScVal::U128(variant.newtype_variant()?),
            Tag::I128 => ScVal::I128(variant.newtype_variant()?),
            Tag::Bytes => ScVal::Bytes(variant.newtype_variant()?),
            Tag::String => ScVal::String(variant.newtype_variant()?),
            Tag::Symbol => ScVal::Symbol(variant.newtype_variant()?),
            Tag::Address => ScVal::Address(variant.newtype_variant()?),
            Tag::Vec => ScVal::Vec(variant.newtype_variant_seed(Items(self.child::<A::Error>()?))?),
            Tag::Map => ScVal::Map(variant.newtype_variant_seed(Entries(self.child::<A::Error>()?))?),
        })
    }
}

struct Items(Nested);

impl<'de> DeserializeSeed<'de> for Items {
    type Value = Vec<ScVal>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for Items {
    type Value = Vec<ScVal>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence of contract values")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(MAX_PREALLOC));
        while let Some(item) = seq.next_element_seed(self.0)? {
            items.push(item);
        }
        Ok(items)
    }
}

struct Entries(Nested);

impl<'de> DeserializeSeed<'de> for Entries {
    type Value = Vec<(ScVal, ScVal)>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for Entries {
    type Value = Vec<(ScVal, ScVal)>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence of key/value pairs")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(MAX_PREALLOC));
        while let Some(entry) = seq.next_element_seed(Entry(self.0))? {
            entries.push(entry);
        }
        Ok(entries)
    }
}

struct Entry(Nested);

impl<'de> DeserializeSeed<'de> for Entry {
    type Value = (ScVal, ScVal);

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_tuple(2, self)
    }
}

impl<'de> Visitor<'de> for Entry {
    type Value = (ScVal, ScVal);

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a key/value pair")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let key = seq
            .next_element_seed(self.0)?
            .ok_or_else(|| <A::Error as de::Error>::invalid_length(0, &self))?;
        let value = seq
            .next_element_seed(self.0)?
            .ok_or_else(|| <A::Error as de::Error>::invalid_length(1, &self))?;
        Ok((key, value))
    }
}

impl From<Address> for ScVal {
    fn from(address: Address) -> Self {
        ScVal::Address(address)
    }
}

impl From<&str> for ScVal {
    fn from(value: &str) -> Self {
        ScVal::String(value.to_string())
    }
}

impl From<String> for ScVal {
    fn from(value: String) -> Self {
        ScVal::String(value)
    }
}

impl From<u32> for ScVal {
    fn from(value: u32) -> Self {
        ScVal::U32(value)
    }
}

impl From<i128> for ScVal {
    fn from(value: i128) -> Self {
        ScVal::I128(value)
    }
}

impl From<bool> for ScVal {
    fn from(value: bool) -> Self {
        ScVal::Bool(value)
    }
}
