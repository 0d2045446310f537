// Copyright (C) 2024-2025 The Market Project.
//
// sc_type.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use market_core::ScVal;
use std::fmt;

/// Declared type of a parameter or return value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScType {
    /// Accepts any value; used for untyped argument lists
    Any,
    Void,
    Bool,
    U32,
    I32,
    U64,
    I64,
    U128,
    I128,
    Bytes,
    /// Fixed-length byte array
    BytesN(usize),
    String,
    Symbol,
    Address,
    Vec(Box<ScType>),
    Option(Box<ScType>),
    Tuple(Vec<ScType>),
    /// Named fields, carried on the wire as a symbol-keyed map in declaration order
    Struct(Vec<(String, ScType)>),
    /// Unit-variant enum, carried on the wire as its `u32` discriminant
    Enum(Vec<(String, u32)>),
}

impl ScType {
    pub fn vec(inner: ScType) -> Self {
        ScType::Vec(Box::new(inner))
    }

    pub fn option(inner: ScType) -> Self {
        ScType::Option(Box::new(inner))
    }

    /// Whether a wire value conforms to this type
    pub fn matches(&self, value: &ScVal) -> bool {
        match (self, value) {
            (ScType::Any, _) => true,
            (ScType::Void, ScVal::Void) => true,
            (ScType::Bool, ScVal::Bool(_)) => true,
            (ScType::U32, ScVal::U32(_)) => true,
            (ScType::I32, ScVal::I32(_)) => true,
            (ScType::U64, ScVal::U64(_)) => true,
            (ScType::I64, ScVal::I64(_)) => true,
            (ScType::U128, ScVal::U128(_)) => true,
            (ScType::I128, ScVal::I128(_)) => true,
            (ScType::Bytes, ScVal::Bytes(_)) => true,
            (ScType::BytesN(n), ScVal::Bytes(bytes)) => bytes.len() == *n,
            (ScType::String, ScVal::String(_)) => true,
            (ScType::Symbol, ScVal::Symbol(_)) => true,
            (ScType::Address, ScVal::Address(_)) => true,
            (ScType::Vec(inner), ScVal::Vec(items)) => items.iter().all(|item| inner.matches(item)),
            (ScType::Option(_), ScVal::Void) => true,
            (ScType::Option(inner), other) => inner.matches(other),
            (ScType::Tuple(types), ScVal::Vec(items)) => {
                types.len() == items.len()
                    && types.iter().zip(items).all(|(ty, item)| ty.matches(item))
            }
            (ScType::Struct(fields), ScVal::Map(entries)) => {
                fields.len() == entries.len()
                    && fields.iter().zip(entries).all(|((name, ty), (key, item))| {
                        key.as_str() == Some(name.as_str()) && ty.matches(item)
                    })
            }
            (ScType::Enum(variants), ScVal::U32(discriminant)) => {
                variants.iter().any(|(_, d)| d == discriminant)
            }
            _ => false,
        }
    }
}

impl fmt::Display for ScType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScType::Any => write!(f, "any"),
            ScType::Void => write!(f, "void"),
            ScType::Bool => write!(f, "bool"),
            ScType::U32 => write!(f, "u32"),
            ScType::I32 => write!(f, "i32"),
            ScType::U64 => write!(f, "u64"),
            ScType::I64 => write!(f, "i64"),
            ScType::U128 => write!(f, "u128"),
            ScType::I128 => write!(f, "i128"),
            ScType::Bytes => write!(f, "bytes"),
            ScType::BytesN(n) => write!(f, "bytes<{}>", n),
            ScType::String => write!(f, "string"),
            ScType::Symbol => write!(f, "symbol"),
            ScType::Address => write!(f, "address"),
            ScType::Vec(inner) => write!(f, "vec<{}>", inner),
            ScType::Option(inner) => write!(f, "option<{}>", inner),
            ScType::Tuple(types) => {
                write!(f, "(")?;
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", ty)?;
                }
                write!(f, ")")
            }
            ScType::Struct(_) => write!(f, "struct"),
            ScType::Enum(_) => write!(f, "enum"),
        }
    }
}
