// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Composable encode/decode units.
//!
//! A coder tree mirrors a resolved type: leaves are primitive coders,
//! composite coders own their children exclusively. Trees are immutable
//! once built and can be shared read-only across threads.
//!
//! # Wire rules
//!
//! - All integers are big-endian, left-zero-padded to the coder width.
//! - Length prefixes are always one 8-byte word.
//! - `decode(data, offset)` returns the value and the offset immediately
//!   following the bytes it consumed.

mod array;
mod dynamic;
mod primitive;
mod string;
mod structs;
mod tuple;
mod variant;
mod vec;

pub use array::ArrayCoder;
pub use dynamic::{ByteCoder, RawSliceCoder, StdStringCoder};
pub use primitive::{BooleanCoder, FixedBytesCoder, NumberCoder, NumberKind};
pub use string::StringCoder;
pub use structs::StructCoder;
pub use tuple::TupleCoder;
pub use variant::{OptionCoder, VariantCoder, VariantLayout};
pub use vec::VecCoder;

use crate::constants::{word_padding, WORD_SIZE};
use crate::error::{AbiError, AbiResult};
use crate::value::AbiValue;
use std::fmt;

/// Coder family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoderKind {
    Primitive,
    Array,
    Struct,
    Tuple,
    Enum,
    Option,
    Vec,
    Bytes,
    String,
    RawSlice,
}

/// Number of bytes a coder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodedLength {
    /// Every encoding has exactly this many bytes.
    Fixed(usize),
    /// Determined by the value; never shorter than `min`.
    Dynamic { min: usize },
}

impl EncodedLength {
    /// The fixed width, if any.
    pub fn fixed(self) -> Option<usize> {
        match self {
            Self::Fixed(n) => Some(n),
            Self::Dynamic { .. } => None,
        }
    }

    /// Lower bound on the encoded size.
    pub fn min(self) -> usize {
        match self {
            Self::Fixed(n) | Self::Dynamic { min: n } => n,
        }
    }

    pub fn is_fixed(self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    /// Combined length of children laid out back to back, each optionally
    /// padded to a word. Saturates at `usize::MAX`; such totals never pass
    /// a bounds check on decode.
    pub(crate) fn sum<I>(lengths: I, padded: bool) -> Self
    where
        I: IntoIterator<Item = EncodedLength>,
    {
        let pad = |n: usize| {
            if padded {
                n.saturating_add(word_padding(n))
            } else {
                n
            }
        };
        let mut fixed = true;
        let mut total = 0usize;
        for len in lengths {
            fixed &= len.is_fixed();
            total = total.saturating_add(pad(len.min()));
        }
        if fixed {
            Self::Fixed(total)
        } else {
            Self::Dynamic { min: total }
        }
    }
}

impl fmt::Display for EncodedLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{} bytes", n),
            Self::Dynamic { min } => write!(f, "dynamic (>= {} bytes)", min),
        }
    }
}

/// Largest buffer reserved up front by [`Coder::encode`]; bigger encodings
/// grow as they are written.
const ENCODE_PREALLOC_LIMIT: usize = 64 * 1024;

/// Symmetric encode/decode for one value shape.
pub trait Coder: Send + Sync + fmt::Debug {
    /// Coder family.
    fn kind(&self) -> CoderKind;

    /// Human readable type label, e.g. `struct Point` or `[u8; 4]`.
    fn type_label(&self) -> &str;

    /// Size of the encodings this coder produces.
    fn encoded_length(&self) -> EncodedLength;

    /// Append the encoding of `value` to `out`.
    fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()>;

    /// Decode one value starting at `offset`.
    fn decode(&self, data: &[u8], offset: usize) -> AbiResult<(AbiValue, usize)>;

    /// Encode `value` into a fresh buffer.
    fn encode(&self, value: &AbiValue) -> AbiResult<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_length().min().min(ENCODE_PREALLOC_LIMIT));
        self.encode_into(value, &mut out)?;
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// `len` bytes at `offset`, or a decode error naming `what`.
pub(crate) fn read_bytes<'d>(
    data: &'d [u8],
    offset: usize,
    len: usize,
    what: &str,
) -> AbiResult<&'d [u8]> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| AbiError::decode(format!("Invalid {what} data size.")))
}

/// Write `value` big-endian, left-zero-padded to `width` bytes.
///
/// `value` must fit in `width` bytes; callers check beforehand.
pub(crate) fn write_uint(out: &mut Vec<u8>, value: u64, width: usize) {
    let be = value.to_be_bytes();
    if width >= WORD_SIZE {
        out.resize(out.len() + (width - WORD_SIZE), 0);
        out.extend_from_slice(&be);
    } else {
        out.extend_from_slice(&be[WORD_SIZE - width..]);
    }
}

/// Big-endian unsigned integer, `None` if it does not fit in a `u64`.
pub(crate) fn read_uint(bytes: &[u8]) -> Option<u64> {
    let split = bytes.len().saturating_sub(WORD_SIZE);
    let (high, low) = bytes.split_at(split);
    if high.iter().any(|&b| b != 0) {
        return None;
    }
    Some(low.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

/// Read one length/count word.
pub(crate) fn read_word(data: &[u8], offset: usize, what: &str) -> AbiResult<u64> {
    let bytes = read_bytes(data, offset, WORD_SIZE, what)?;
    read_uint(bytes).ok_or_else(|| AbiError::decode(format!("Invalid {what} data size.")))
}

/// Convert a decoded count into a `usize`.
pub(crate) fn word_to_usize(word: u64, what: &str) -> AbiResult<usize> {
    usize::try_from(word).map_err(|_| AbiError::decode(format!("Invalid {what} byte data size.")))
}

/// Encode one child, padding its output to a word when `padded`.
pub(crate) fn encode_child(
    coder: &dyn Coder,
    value: &AbiValue,
    out: &mut Vec<u8>,
    padded: bool,
) -> AbiResult<()> {
    let start = out.len();
    coder.encode_into(value, out)?;
    if padded {
        let written = out.len() - start;
        out.resize(out.len() + word_padding(written), 0);
    }
    Ok(())
}

/// Decode one child, skipping its word padding when `padded`.
pub(crate) fn decode_child(
    coder: &dyn Coder,
    data: &[u8],
    offset: usize,
    padded: bool,
    what: &str,
) -> AbiResult<(AbiValue, usize)> {
    let (value, next) = coder.decode(data, offset)?;
    if !padded {
        return Ok((value, next));
    }
    let padding = word_padding(next - offset);
    read_bytes(data, next, padding, what)?;
    Ok((value, next + padding))
}
