// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural shapes recognised in type strings.

use crate::constants::{
    B256_TYPE, B512_NAMES, BOOL_TYPE, BYTES_NAMES, OPTION_NAMES, RAW_PTR_TYPE, RAW_SLICE_TYPE,
    STD_STRING_NAMES, STR_SLICE_TYPE, U16_TYPE, U32_TYPE, U64_TYPE, U8_TYPE, VEC_NAMES,
};

/// Every type shape the coder factory knows how to handle.
///
/// [`TypeShape::parse`] tries the shapes in factory dispatch order, so
/// builtin structs (`struct Vec`, `struct Bytes`, ...) never fall through to
/// [`TypeShape::Struct`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeShape {
    U8,
    U16,
    U32,
    U64,
    RawPtr,
    RawSlice,
    Bool,
    B256,
    B512,
    Bytes,
    StdString,
    /// `str[N]`.
    FixedString(usize),
    /// `[T; N]`.
    Array(usize),
    Vec,
    Struct(String),
    Option,
    Enum(String),
    /// `(T, U, ...)`, including the unit type `()`.
    Tuple,
    /// Bare `str`.
    StrSlice,
    /// `generic T`.
    Generic(String),
    Unknown,
}

impl TypeShape {
    /// Classify a type string.
    pub fn parse(type_field: &str) -> Self {
        let ty = type_field.trim();
        match ty {
            U8_TYPE => return Self::U8,
            U16_TYPE => return Self::U16,
            U32_TYPE => return Self::U32,
            U64_TYPE => return Self::U64,
            RAW_PTR_TYPE => return Self::RawPtr,
            RAW_SLICE_TYPE => return Self::RawSlice,
            BOOL_TYPE => return Self::Bool,
            B256_TYPE => return Self::B256,
            _ => {}
        }

        let struct_name = ty.strip_prefix("struct ").map(str::trim);
        if let Some(name) = struct_name {
            if B512_NAMES.contains(&name) {
                return Self::B512;
            }
            if BYTES_NAMES.contains(&name) {
                return Self::Bytes;
            }
            if STD_STRING_NAMES.contains(&name) {
                return Self::StdString;
            }
        }

        if let Some(len) = parse_fixed_string(ty) {
            return Self::FixedString(len);
        }
        if let Some(len) = parse_array(ty) {
            return Self::Array(len);
        }

        if let Some(name) = struct_name {
            if VEC_NAMES.contains(&name) {
                return Self::Vec;
            }
            return Self::Struct(name.to_string());
        }

        if let Some(name) = ty.strip_prefix("enum ").map(str::trim) {
            if OPTION_NAMES.contains(&name) {
                return Self::Option;
            }
            return Self::Enum(name.to_string());
        }

        if ty.starts_with('(') && ty.ends_with(')') {
            return Self::Tuple;
        }
        if ty == STR_SLICE_TYPE {
            return Self::StrSlice;
        }
        if let Some(name) = ty.strip_prefix("generic ") {
            return Self::Generic(name.trim().to_string());
        }
        Self::Unknown
    }

    /// True for `generic T` placeholders.
    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Generic(_))
    }
}

/// `str[N]` -> `N`.
fn parse_fixed_string(ty: &str) -> Option<usize> {
    ty.strip_prefix("str[")?.strip_suffix(']')?.trim().parse().ok()
}

/// `[T; N]` -> `N`.
fn parse_array(ty: &str) -> Option<usize> {
    let inner = ty.strip_prefix('[')?.strip_suffix(']')?;
    let (item, len) = inner.rsplit_once(';')?;
    if item.trim().is_empty() {
        return None;
    }
    len.trim().parse().ok()
}
