// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-width leaf coders.

use super::{read_bytes, read_uint, write_uint, Coder, CoderKind, EncodedLength};
use crate::constants::{B256_SIZE, B512_SIZE};
use crate::error::{AbiError, AbiResult};
use crate::value::AbiValue;

/// Unsigned integer widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    U8,
    U16,
    U32,
    U64,
}

impl NumberKind {
    /// Natural width in bytes.
    pub fn size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }

    /// Largest representable value.
    pub fn max(self) -> u64 {
        match self {
            Self::U8 => u64::from(u8::MAX),
            Self::U16 => u64::from(u16::MAX),
            Self::U32 => u64::from(u32::MAX),
            Self::U64 => u64::MAX,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
        }
    }

    fn to_value(self, v: u64) -> AbiValue {
        // Callers range-check against `max()` first.
        match self {
            Self::U8 => AbiValue::U8(v as u8),
            Self::U16 => AbiValue::U16(v as u16),
            Self::U32 => AbiValue::U32(v as u32),
            Self::U64 => AbiValue::U64(v),
        }
    }
}

// ---------------------------------------------------------------------------
// NumberCoder
// ---------------------------------------------------------------------------

/// Unsigned integer, big-endian, left-padded to `width` bytes.
#[derive(Debug, Clone)]
pub struct NumberCoder {
    kind: NumberKind,
    width: usize,
    label: String,
}

impl NumberCoder {
    /// Integer of `kind` occupying `width` bytes (at least its natural size).
    pub fn new(kind: NumberKind, width: usize, label: impl Into<String>) -> Self {
        Self {
            kind,
            width: width.max(kind.size()),
            label: label.into(),
        }
    }

    pub fn number_kind(&self) -> NumberKind {
        self.kind
    }
}

impl Coder for NumberCoder {
    fn kind(&self) -> CoderKind {
        CoderKind::Primitive
    }

    fn type_label(&self) -> &str {
        &self.label
    }

    fn encoded_length(&self) -> EncodedLength {
        EncodedLength::Fixed(self.width)
    }

    fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()> {
        let v = value.as_u64().ok_or_else(|| {
            AbiError::encode(format!(
                "Invalid {}: expected an unsigned integer, got {}.",
                self.kind.name(),
                value.type_name()
            ))
        })?;
        if v > self.kind.max() {
            return Err(AbiError::encode(format!(
                "Invalid {}. Too many bytes.",
                self.kind.name()
            )));
        }
        write_uint(out, v, self.width);
        Ok(())
    }

    fn decode(&self, data: &[u8], offset: usize) -> AbiResult<(AbiValue, usize)> {
        let bytes = read_bytes(data, offset, self.width, "number")?;
        let v = read_uint(bytes)
            .filter(|&v| v <= self.kind.max())
            .ok_or_else(|| {
                AbiError::decode(format!("Invalid {}. Too many bytes.", self.kind.name()))
            })?;
        Ok((self.kind.to_value(v), offset + self.width))
    }
}

// ---------------------------------------------------------------------------
// BooleanCoder
// ---------------------------------------------------------------------------

/// Boolean stored as 0 or 1, left-padded to `width` bytes.
#[derive(Debug, Clone)]
pub struct BooleanCoder {
    width: usize,
}

impl BooleanCoder {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }
}

impl Coder for BooleanCoder {
    fn kind(&self) -> CoderKind {
        CoderKind::Primitive
    }

    fn type_label(&self) -> &str {
        "bool"
    }

    fn encoded_length(&self) -> EncodedLength {
        EncodedLength::Fixed(self.width)
    }

    fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()> {
        let v = value.as_bool().ok_or_else(|| {
            AbiError::encode(format!("Invalid boolean value: got {}.", value.type_name()))
        })?;
        write_uint(out, u64::from(v), self.width);
        Ok(())
    }

    fn decode(&self, data: &[u8], offset: usize) -> AbiResult<(AbiValue, usize)> {
        let bytes = read_bytes(data, offset, self.width, "boolean")?;
        let v = match read_uint(bytes) {
            Some(0) => false,
            Some(1) => true,
            _ => return Err(AbiError::decode("Invalid boolean value.")),
        };
        Ok((AbiValue::Bool(v), offset + self.width))
    }
}

// ---------------------------------------------------------------------------
// FixedBytesCoder
// ---------------------------------------------------------------------------

/// 32-byte (`b256`) or 64-byte (`B512`) block, copied verbatim.
#[derive(Debug, Clone)]
pub struct FixedBytesCoder {
    size: usize,
    label: &'static str,
}

impl FixedBytesCoder {
    pub fn b256() -> Self {
        Self {
            size: B256_SIZE,
            label: "b256",
        }
    }

    pub fn b512() -> Self {
        Self {
            size: B512_SIZE,
            label: "struct B512",
        }
    }
}

impl Coder for FixedBytesCoder {
    fn kind(&self) -> CoderKind {
        CoderKind::Primitive
    }

    fn type_label(&self) -> &str {
        self.label
    }

    fn encoded_length(&self) -> EncodedLength {
        EncodedLength::Fixed(self.size)
    }

    fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()> {
        match value {
            AbiValue::B256(b) if self.size == B256_SIZE => out.extend_from_slice(b),
            AbiValue::B512(b) if self.size == B512_SIZE => out.extend_from_slice(b),
            AbiValue::Bytes(b) if b.len() == self.size => out.extend_from_slice(b),
            other => {
                return Err(AbiError::encode(format!(
                    "Invalid {}: expected {} bytes, got {}.",
                    self.label,
                    self.size,
                    other.type_name()
                )))
            }
        }
        Ok(())
    }

    fn decode(&self, data: &[u8], offset: usize) -> AbiResult<(AbiValue, usize)> {
        let bytes = read_bytes(data, offset, self.size, self.label)?;
        let value = if self.size == B256_SIZE {
            let mut block = [0u8; B256_SIZE];
            block.copy_from_slice(bytes);
            AbiValue::B256(block)
        } else {
            let mut block = [0u8; B512_SIZE];
            block.copy_from_slice(bytes);
            AbiValue::B512(block)
        };
        Ok((value, offset + self.size))
    }
}
