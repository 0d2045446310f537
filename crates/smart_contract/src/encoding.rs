// Copyright (C) 2024-2025 The Market Project.
//
// encoding.rs file belongs to the market project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Argument encoding.
//!
//! Callers describe arguments as JSON values keyed by parameter name. Each
//! value is converted into the wire type the method declares; anything that
//! cannot be represented fails locally with an [`EncodingError`] and never
//! reaches the network.

use crate::{MethodSpec, ScType};
use indexmap::IndexMap;
use market_core::{Address, ScVal};
use serde_json::Value;
use thiserror::Error;

/// Maximum length of a symbol, in bytes
pub const MAX_SYMBOL_LEN: usize = 32;

/// Local argument encoding failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Unknown contract {0}")]
    UnknownContract(String),

    #[error("Unknown method `{0}`")]
    UnknownMethod(String),

    #[error("Method `{method}` takes {expected} arguments, got {found}")]
    Arity {
        method: String,
        expected: usize,
        found: usize,
    },

    #[error("Missing argument `{0}`")]
    MissingArgument(String),

    #[error("Unexpected argument `{0}`")]
    UnexpectedArgument(String),

    #[error("Argument `{arg}`: expected {expected}, got {found}")]
    TypeMismatch {
        arg: String,
        expected: String,
        found: String,
    },

    #[error("Argument `{arg}`: {value} is out of range for {ty}")]
    OutOfRange {
        arg: String,
        value: String,
        ty: String,
    },

    #[error("Argument `{arg}`: length {len} exceeds limit {max}")]
    TooLong { arg: String, len: usize, max: usize },

    #[error("Argument `{arg}`: {reason}")]
    Invalid { arg: String, reason: String },
}

/// Encodes named arguments in the order the method declares them
pub fn encode_args(
    method: &MethodSpec,
    args: &IndexMap<String, Value>,
) -> Result<Vec<ScVal>, EncodingError> {
    if args.len() > method.inputs.len() {
        return Err(EncodingError::Arity {
            method: method.name.clone(),
            expected: method.inputs.len(),
            found: args.len(),
        });
    }

    if let Some(unknown) = args
        .keys()
        .find(|name| !method.inputs.iter().any(|p| &p.name == *name))
    {
        return Err(EncodingError::UnexpectedArgument(unknown.clone()));
    }

    method
        .inputs
        .iter()
        .map(|param| {
            let value = args
                .get(&param.name)
                .ok_or_else(|| EncodingError::MissingArgument(param.name.clone()))?;
            let encoded = encode_value(&param.name, value, &param.ty)?;
            if let Some(max) = param.max_len {
                check_len(&param.name, &encoded, max)?;
            }
            Ok(encoded)
        })
        .collect()
}

/// Encodes a single JSON value as the given wire type
pub fn encode_value(arg: &str, value: &Value, ty: &ScType) -> Result<ScVal, EncodingError> {
    match ty {
        ScType::Any => Ok(encode_any(value)),
        ScType::Void => match value {
            Value::Null => Ok(ScVal::Void),
            other => Err(mismatch(arg, ty, other)),
        },
        ScType::Bool => value
            .as_bool()
            .map(ScVal::Bool)
            .ok_or_else(|| mismatch(arg, ty, value)),
        ScType::U32 => {
            let n = unsigned(arg, value, ty)?;
            u32::try_from(n)
                .map(ScVal::U32)
                .map_err(|_| out_of_range(arg, value, ty))
        }
        ScType::U64 => {
            let n = unsigned(arg, value, ty)?;
            u64::try_from(n)
                .map(ScVal::U64)
                .map_err(|_| out_of_range(arg, value, ty))
        }
        ScType::U128 => unsigned(arg, value, ty).map(ScVal::U128),
        ScType::I32 => {
            let n = signed(arg, value, ty)?;
            i32::try_from(n)
                .map(ScVal::I32)
                .map_err(|_| out_of_range(arg, value, ty))
        }
        ScType::I64 => {
            let n = signed(arg, value, ty)?;
            i64::try_from(n)
                .map(ScVal::I64)
                .map_err(|_| out_of_range(arg, value, ty))
        }
        ScType::I128 => signed(arg, value, ty).map(ScVal::I128),
        ScType::String => value
            .as_str()
            .map(|s| ScVal::String(s.to_string()))
            .ok_or_else(|| mismatch(arg, ty, value)),
        ScType::Symbol => {
            let s = value.as_str().ok_or_else(|| mismatch(arg, ty, value))?;
            if s.len() > MAX_SYMBOL_LEN {
                return Err(EncodingError::TooLong {
                    arg: arg.to_string(),
                    len: s.len(),
                    max: MAX_SYMBOL_LEN,
                });
            }
            if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(EncodingError::Invalid {
                    arg: arg.to_string(),
                    reason: format!("`{}` is not a valid symbol", s),
                });
            }
            Ok(ScVal::Symbol(s.to_string()))
        }
        ScType::Bytes => bytes(arg, value, ty).map(ScVal::Bytes),
        ScType::BytesN(n) => {
            let data = bytes(arg, value, ty)?;
            if data.len() != *n {
                return Err(EncodingError::Invalid {
                    arg: arg.to_string(),
                    reason: format!("expected {} bytes, got {}", n, data.len()),
                });
            }
            Ok(ScVal::Bytes(data))
        }
        ScType::Address => {
            let s = value.as_str().ok_or_else(|| mismatch(arg, ty, value))?;
            Address::parse(s)
                .map(ScVal::Address)
                .map_err(|e| EncodingError::Invalid {
                    arg: arg.to_string(),
                    reason: e.to_string(),
                })
        }
        ScType::Vec(inner) => {
            let items = value.as_array().ok_or_else(|| mismatch(arg, ty, value))?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| encode_value(&format!("{}[{}]", arg, i), item, inner))
                .collect::<Result<Vec<_>, _>>()
                .map(ScVal::Vec)
        }
        ScType::Option(inner) => match value {
            Value::Null => Ok(ScVal::Void),
            other => encode_value(arg, other, inner),
        },
        ScType::Tuple(types) => {
            let items = value.as_array().ok_or_else(|| mismatch(arg, ty, value))?;
            if items.len() != types.len() {
                return Err(EncodingError::Invalid {
                    arg: arg.to_string(),
                    reason: format!("expected {} elements, got {}", types.len(), items.len()),
                });
            }
            types
                .iter()
                .zip(items)
                .enumerate()
                .map(|(i, (ty, item))| encode_value(&format!("{}.{}", arg, i), item, ty))
                .collect::<Result<Vec<_>, _>>()
                .map(ScVal::Vec)
        }
        ScType::Struct(fields) => {
            let object = value.as_object().ok_or_else(|| mismatch(arg, ty, value))?;
            if let Some(extra) = object
                .keys()
                .find(|key| !fields.iter().any(|(name, _)| name == *key))
            {
                return Err(EncodingError::UnexpectedArgument(format!("{}.{}", arg, extra)));
            }
            fields
                .iter()
                .map(|(name, field_ty)| {
                    let path = format!("{}.{}", arg, name);
                    let field = object
                        .get(name)
                        .ok_or_else(|| EncodingError::MissingArgument(path.clone()))?;
                    Ok((ScVal::Symbol(name.clone()), encode_value(&path, field, field_ty)?))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ScVal::Map)
        }
        ScType::Enum(variants) => {
            let discriminant = match value {
                Value::String(name) => variants
                    .iter()
                    .find(|(variant, _)| variant == name)
                    .map(|(_, d)| *d),
                Value::Number(n) => n
                    .as_u64()
                    .and_then(|d| u32::try_from(d).ok())
                    .filter(|d| variants.iter().any(|(_, v)| v == d)),
                _ => None,
            };
            discriminant.map(ScVal::U32).ok_or_else(|| EncodingError::Invalid {
                arg: arg.to_string(),
                reason: format!("{} is not a declared variant", value),
            })
        }
    }
}

fn encode_any(value: &Value) -> ScVal {
    match value {
        Value::Null => ScVal::Void,
        Value::Bool(b) => ScVal::Bool(*b),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => ScVal::I64(i),
            (None, Some(u)) => ScVal::U64(u),
            _ => ScVal::String(n.to_string()),
        },
        Value::String(s) => ScVal::String(s.clone()),
        Value::Array(items) => ScVal::Vec(items.iter().map(encode_any).collect()),
        Value::Object(map) => ScVal::Map(
            map.iter()
                .map(|(k, v)| (ScVal::Symbol(k.clone()), encode_any(v)))
                .collect(),
        ),
    }
}

/// Integers may be given as JSON numbers or as decimal strings for wide types
fn signed(arg: &str, value: &Value, ty: &ScType) -> Result<i128, EncodingError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .ok_or_else(|| mismatch(arg, ty, value)),
        Value::String(s) => s.trim().parse::<i128>().map_err(|_| mismatch(arg, ty, value)),
        other => Err(mismatch(arg, ty, other)),
    }
}

fn unsigned(arg: &str, value: &Value, ty: &ScType) -> Result<u128, EncodingError> {
    let text = match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return Ok(u128::from(u));
            }
            if n.as_i64().is_some() {
                return Err(out_of_range(arg, value, ty));
            }
            return Err(mismatch(arg, ty, value));
        }
        Value::String(s) => s.trim(),
        other => return Err(mismatch(arg, ty, other)),
    };

    if text.starts_with('-') && text.parse::<i128>().is_ok() {
        return Err(out_of_range(arg, value, ty));
    }
    text.parse::<u128>().map_err(|_| mismatch(arg, ty, value))
}

fn bytes(arg: &str, value: &Value, ty: &ScType) -> Result<Vec<u8>, EncodingError> {
    match value {
        Value::String(s) => hex::decode(s.trim_start_matches("0x")).map_err(|e| {
            EncodingError::Invalid {
                arg: arg.to_string(),
                reason: format!("invalid hex: {}", e),
            }
        }),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|b| u8::try_from(b).ok())
                    .ok_or_else(|| out_of_range(arg, item, &ScType::Bytes))
            })
            .collect(),
        other => Err(mismatch(arg, ty, other)),
    }
}

fn check_len(arg: &str, value: &ScVal, max: usize) -> Result<(), EncodingError> {
    let len = match value {
        ScVal::String(s) | ScVal::Symbol(s) => s.len(),
        ScVal::Bytes(b) => b.len(),
        _ => return Ok(()),
    };
    if len > max {
        return Err(EncodingError::TooLong {
            arg: arg.to_string(),
            len,
            max,
        });
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(arg: &str, ty: &ScType, value: &Value) -> EncodingError {
    EncodingError::TypeMismatch {
        arg: arg.to_string(),
        expected: ty.to_string(),
        found: json_kind(value).to_string(),
    }
}

fn out_of_range(arg: &str, value: &Value, ty: &ScType) -> EncodingError {
    EncodingError::OutOfRange {
        arg: arg.to_string(),
        value: value.to_string(),
        ty: ty.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParameterSpec;
    use serde_json::json;

    fn create_nft() -> MethodSpec {
        MethodSpec::new("create_nft")
            .input(ParameterSpec::new("owner", ScType::Address))
            .input(ParameterSpec::new("name", ScType::String).with_max_len(8))
            .input(ParameterSpec::new("supply", ScType::U32))
            .returns(ScType::Address)
    }

    fn args(value: Value) -> IndexMap<String, Value> {
        value
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    #[test]
    fn encodes_in_declared_order() {
        let owner = Address::account([1; 32]);
        let encoded = encode_args(
            &create_nft(),
            &args(json!({"supply": 10, "name": "Beats", "owner": owner.to_string()})),
        )
        .unwrap();
        assert_eq!(
            encoded,
            vec![
                ScVal::Address(owner),
                ScVal::String("Beats".into()),
                ScVal::U32(10)
            ]
        );
    }

    #[test]
    fn negative_for_unsigned_is_out_of_range() {
        let owner = Address::account([1; 32]).to_string();
        let err = encode_args(
            &create_nft(),
            &args(json!({"owner": owner, "name": "x", "supply": -1})),
        )
        .unwrap_err();
        assert!(matches!(err, EncodingError::OutOfRange { arg, .. } if arg == "supply"));

        let err = encode_value("supply", &json!("-5"), &ScType::U128).unwrap_err();
        assert!(matches!(err, EncodingError::OutOfRange { .. }));
    }

    #[test]
    fn string_over_limit_is_too_long() {
        let owner = Address::account([1; 32]).to_string();
        let err = encode_args(
            &create_nft(),
            &args(json!({"owner": owner, "name": "far too long", "supply": 1})),
        )
        .unwrap_err();
        assert_eq!(
            err,
            EncodingError::TooLong {
                arg: "name".into(),
                len: 12,
                max: 8
            }
        );
    }

    #[test]
    fn arity_and_names_are_checked() {
        let owner = Address::account([1; 32]).to_string();
        let err = encode_args(&create_nft(), &args(json!({"owner": owner, "name": "x"}))).unwrap_err();
        assert_eq!(err, EncodingError::MissingArgument("supply".into()));

        let err = encode_args(
            &create_nft(),
            &args(json!({"owner": owner, "name": "x", "supply": 1, "extra": 2})),
        )
        .unwrap_err();
        assert!(matches!(err, EncodingError::Arity { expected: 3, found: 4, .. }));

        let err = encode_args(
            &create_nft(),
            &args(json!({"owner": owner, "title": "x", "supply": 1})),
        )
        .unwrap_err();
        assert_eq!(err, EncodingError::UnexpectedArgument("title".into()));
    }

    #[test]
    fn wide_integers_accept_decimal_strings() {
        let value = encode_value("amount", &json!("-170141183460469231731687303715884105728"), &ScType::I128)
            .unwrap();
        assert_eq!(value, ScVal::I128(i128::MIN));
        assert_eq!(
            encode_value("amount", &json!(-1), &ScType::I128).unwrap(),
            ScVal::I128(-1)
        );
        assert!(matches!(
            encode_value("amount", &json!(1.5), &ScType::I128),
            Err(EncodingError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn fixed_bytes_and_enums() {
        let hash = "00".repeat(32);
        assert_eq!(
            encode_value("wasm_hash", &json!(hash), &ScType::BytesN(32)).unwrap(),
            ScVal::Bytes(vec![0; 32])
        );
        assert!(encode_value("wasm_hash", &json!("abcd"), &ScType::BytesN(32)).is_err());

        let token_type = ScType::Enum(vec![("Sac".into(), 0), ("Nft".into(), 3)]);
        assert_eq!(encode_value("t", &json!("Nft"), &token_type).unwrap(), ScVal::U32(3));
        assert_eq!(encode_value("t", &json!(0), &token_type).unwrap(), ScVal::U32(0));
        assert!(encode_value("t", &json!("Fungible"), &token_type).is_err());
    }

    #[test]
    fn symbols_are_restricted() {
        assert!(encode_value("s", &json!("transfer_v2"), &ScType::Symbol).is_ok());
        assert!(matches!(
            encode_value("s", &json!("not a symbol"), &ScType::Symbol),
            Err(EncodingError::Invalid { .. })
        ));
    }
}
