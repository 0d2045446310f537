// Copyright (C) 2024-2025 The Market Project.
//
// convert.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Conversions from wire values into native types.

use crate::CodecError;
use market_core::{Address, ScVal};

/// Native types a decoded success payload can be converted into
pub trait FromScVal: Sized {
    fn from_sc_val(value: &ScVal) -> Result<Self, CodecError>;
}

/// Owned byte payload; distinct from `Vec<u8>`, which decodes a vector of `u32`s
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

fn unexpected(expected: &str, value: &ScVal) -> CodecError {
    CodecError::decode(format!("expected {}, got {}", expected, value.type_name()))
}

impl FromScVal for ScVal {
    fn from_sc_val(value: &ScVal) -> Result<Self, CodecError> {
        Ok(value.clone())
    }
}

impl FromScVal for () {
    fn from_sc_val(value: &ScVal) -> Result<Self, CodecError> {
        match value {
            ScVal::Void => Ok(()),
            other => Err(unexpected("void", other)),
        }
    }
}

macro_rules! impl_from_sc_val {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl FromScVal for $ty {
            fn from_sc_val(value: &ScVal) -> Result<Self, CodecError> {
                match value {
                    ScVal::$variant(v) => Ok(*v),
                    other => Err(unexpected($name, other)),
                }
            }
        }
    };
}

impl_from_sc_val!(bool, Bool, "bool");
impl_from_sc_val!(u32, U32, "u32");
impl_from_sc_val!(i32, I32, "i32");
impl_from_sc_val!(u64, U64, "u64");
impl_from_sc_val!(i64, I64, "i64");
impl_from_sc_val!(u128, U128, "u128");
impl_from_sc_val!(i128, I128, "i128");
impl_from_sc_val!(Address, Address, "address");

impl FromScVal for String {
    fn from_sc_val(value: &ScVal) -> Result<Self, CodecError> {
        match value {
            ScVal::String(s) | ScVal::Symbol(s) => Ok(s.clone()),
            other => Err(unexpected("string", other)),
        }
    }
}

impl FromScVal for Bytes {
    fn from_sc_val(value: &ScVal) -> Result<Self, CodecError> {
        match value {
            ScVal::Bytes(b) => Ok(Bytes(b.clone())),
            other => Err(unexpected("bytes", other)),
        }
    }
}

impl<T: FromScVal> FromScVal for Vec<T> {
    fn from_sc_val(value: &ScVal) -> Result<Self, CodecError> {
        match value {
            ScVal::Vec(items) => items.iter().map(T::from_sc_val).collect(),
            other => Err(unexpected("vec", other)),
        }
    }
}

impl<T: FromScVal> FromScVal for Option<T> {
    fn from_sc_val(value: &ScVal) -> Result<Self, CodecError> {
        match value {
            ScVal::Void => Ok(None),
            other => T::from_sc_val(other).map(Some),
        }
    }
}

/// Reads a field out of a symbol-keyed map, for struct decoding
pub fn field<T: FromScVal>(value: &ScVal, name: &str) -> Result<T, CodecError> {
    let field = value
        .map_get(name)
        .ok_or_else(|| CodecError::decode(format!("missing field `{}`", name)))?;
    T::from_sc_val(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vectors_and_options() {
        let value = ScVal::Vec(vec![ScVal::U32(1), ScVal::U32(2)]);
        assert_eq!(Vec::<u32>::from_sc_val(&value).unwrap(), vec![1, 2]);
        assert_eq!(Option::<u32>::from_sc_val(&ScVal::Void).unwrap(), None);
        assert!(Vec::<u32>::from_sc_val(&ScVal::Vec(vec![ScVal::Bool(true)])).is_err());
    }

    #[test]
    fn strings_accept_symbols() {
        assert_eq!(String::from_sc_val(&ScVal::Symbol("Nft".into())).unwrap(), "Nft");
        assert!(matches!(
            String::from_sc_val(&ScVal::U32(1)),
            Err(CodecError::Decode(reason)) if reason == "expected string, got u32"
        ));
    }
}
