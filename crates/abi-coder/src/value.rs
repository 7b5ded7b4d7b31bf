// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native values handed to and returned by coders.

use crate::constants::{B256_SIZE, B512_SIZE};
use std::collections::BTreeMap;

/// A value of any ABI type.
///
/// Struct values and enum values are both records: a struct record carries
/// one entry per field, an enum record carries exactly one entry keyed by the
/// active case name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    // Primitives
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    B256([u8; B256_SIZE]),
    B512([u8; B512_SIZE]),

    // Text and blobs
    String(String),
    Bytes(Vec<u8>),
    RawSlice(Vec<u64>),

    // Composites
    Array(Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
    Record(BTreeMap<String, AbiValue>),
    Option(Option<Box<AbiValue>>),
}

impl AbiValue {
    /// The unit value `()`.
    pub fn unit() -> Self {
        Self::Tuple(Vec::new())
    }

    /// Build a record from `(name, value)` pairs.
    pub fn record<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AbiValue)>,
    {
        Self::Record(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build an enum value with `case` active.
    pub fn variant(case: impl Into<String>, value: AbiValue) -> Self {
        let mut map = BTreeMap::new();
        map.insert(case.into(), value);
        Self::Record(map)
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::B256(_) => "b256",
            Self::B512(_) => "b512",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::RawSlice(_) => "raw slice",
            Self::Array(_) => "array",
            Self::Tuple(_) => "tuple",
            Self::Record(_) => "record",
            Self::Option(_) => "option",
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Any unsigned integer variant, widened to `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U8(v) => Some(u64::from(*v)),
            Self::U16(v) => Some(u64::from(*v)),
            Self::U32(v) => Some(u64::from(*v)),
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Raw bytes of a byte blob, or of an array made only of `u8` values.
    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Self::Bytes(v) => Some(v.clone()),
            Self::Array(items) => items
                .iter()
                .map(|item| match item {
                    Self::U8(b) => Some(*b),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    /// Elements of an array or tuple.
    pub fn as_sequence(&self) -> Option<&[AbiValue]> {
        match self {
            Self::Array(v) | Self::Tuple(v) => Some(v),
            _ => None,
        }
    }

    /// Entries of a record.
    pub fn as_record(&self) -> Option<&BTreeMap<String, AbiValue>> {
        match self {
            Self::Record(map) => Some(map),
            _ => None,
        }
    }

    /// Try to get a record field.
    pub fn get_field(&self, name: &str) -> Option<&AbiValue> {
        self.as_record()?.get(name)
    }

    /// Active case of an enum record.
    pub fn variant_case(&self) -> Option<(&str, &AbiValue)> {
        match self {
            Self::Record(map) if map.len() == 1 => {
                map.iter().next().map(|(k, v)| (k.as_str(), v))
            }
            _ => None,
        }
    }
}

impl From<bool> for AbiValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<u8> for AbiValue {
    fn from(v: u8) -> Self {
        Self::U8(v)
    }
}

impl From<u16> for AbiValue {
    fn from(v: u16) -> Self {
        Self::U16(v)
    }
}

impl From<u32> for AbiValue {
    fn from(v: u32) -> Self {
        Self::U32(v)
    }
}

impl From<u64> for AbiValue {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl From<[u8; B256_SIZE]> for AbiValue {
    fn from(v: [u8; B256_SIZE]) -> Self {
        Self::B256(v)
    }
}

impl From<[u8; B512_SIZE]> for AbiValue {
    fn from(v: [u8; B512_SIZE]) -> Self {
        Self::B512(v)
    }
}

impl From<String> for AbiValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for AbiValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<AbiValue>> From<Vec<T>> for AbiValue {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<AbiValue>> From<Option<T>> for AbiValue {
    fn from(v: Option<T>) -> Self {
        Self::Option(v.map(|inner| Box::new(inner.into())))
    }
}
