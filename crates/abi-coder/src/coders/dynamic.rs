// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Length-prefixed blobs: `Bytes`, `String` and raw untyped slices.
//!
//! Layout: one count word, then the payload. Under the legacy encoding the
//! payload is right-padded to a word boundary.

use super::{read_bytes, read_word, word_to_usize, write_uint, Coder, CoderKind, EncodedLength};
use crate::constants::{word_padding, WORD_SIZE};
use crate::error::{AbiError, AbiResult};
use crate::value::AbiValue;

/// Names used to build the two decode error messages of a blob coder.
struct BlobLabels {
    /// Short buffer while reading the count word.
    header: &'static str,
    /// Short buffer while reading the payload.
    payload: &'static str,
}

fn write_prefixed(out: &mut Vec<u8>, count: usize, payload: &[u8], pad: bool) {
    write_uint(out, count as u64, WORD_SIZE);
    out.extend_from_slice(payload);
    if pad {
        out.resize(out.len() + word_padding(payload.len()), 0);
    }
}

/// Returns `(payload, next_offset)`; the payload is `count * unit` bytes.
fn read_prefixed<'d>(
    data: &'d [u8],
    offset: usize,
    unit: usize,
    pad: bool,
    labels: &BlobLabels,
) -> AbiResult<(&'d [u8], usize)> {
    let count = word_to_usize(read_word(data, offset, labels.header)?, labels.payload)?;
    let len = count
        .checked_mul(unit)
        .ok_or_else(|| AbiError::decode(format!("Invalid {} data size.", labels.payload)))?;
    let start = offset + WORD_SIZE;
    let payload = read_bytes(data, start, len, labels.payload)?;
    let mut next = start + len;
    if pad {
        let padding = word_padding(len);
        read_bytes(data, next, padding, labels.payload)?;
        next += padding;
    }
    Ok((payload, next))
}

// ---------------------------------------------------------------------------
// ByteCoder
// ---------------------------------------------------------------------------

const BYTES_LABELS: BlobLabels = BlobLabels {
    header: "byte",
    payload: "bytes byte",
};

/// `std::bytes::Bytes`: count of bytes, then the bytes.
#[derive(Debug, Clone)]
pub struct ByteCoder {
    pad: bool,
}

impl ByteCoder {
    pub fn new(pad: bool) -> Self {
        Self { pad }
    }
}

impl Coder for ByteCoder {
    fn kind(&self) -> CoderKind {
        CoderKind::Bytes
    }

    fn type_label(&self) -> &str {
        "struct Bytes"
    }

    fn encoded_length(&self) -> EncodedLength {
        EncodedLength::Dynamic { min: WORD_SIZE }
    }

    fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()> {
        let bytes = value
            .as_bytes()
            .ok_or_else(|| AbiError::encode("Expected array value."))?;
        write_prefixed(out, bytes.len(), &bytes, self.pad);
        Ok(())
    }

    fn decode(&self, data: &[u8], offset: usize) -> AbiResult<(AbiValue, usize)> {
        let (payload, next) = read_prefixed(data, offset, 1, self.pad, &BYTES_LABELS)?;
        Ok((AbiValue::Bytes(payload.to_vec()), next))
    }
}

// ---------------------------------------------------------------------------
// StdStringCoder
// ---------------------------------------------------------------------------

const STD_STRING_LABELS: BlobLabels = BlobLabels {
    header: "std string",
    payload: "std string byte",
};

/// `std::string::String`: count of UTF-8 bytes, then the bytes.
#[derive(Debug, Clone)]
pub struct StdStringCoder {
    pad: bool,
}

impl StdStringCoder {
    pub fn new(pad: bool) -> Self {
        Self { pad }
    }
}

impl Coder for StdStringCoder {
    fn kind(&self) -> CoderKind {
        CoderKind::String
    }

    fn type_label(&self) -> &str {
        "struct String"
    }

    fn encoded_length(&self) -> EncodedLength {
        EncodedLength::Dynamic { min: WORD_SIZE }
    }

    fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()> {
        let s = value.as_str().ok_or_else(|| {
            AbiError::encode(format!(
                "Expected string value for struct String, got {}.",
                value.type_name()
            ))
        })?;
        write_prefixed(out, s.len(), s.as_bytes(), self.pad);
        Ok(())
    }

    fn decode(&self, data: &[u8], offset: usize) -> AbiResult<(AbiValue, usize)> {
        let (payload, next) = read_prefixed(data, offset, 1, self.pad, &STD_STRING_LABELS)?;
        let s = std::str::from_utf8(payload)
            .map_err(|e| AbiError::decode(format!("Invalid UTF-8 in struct String: {e}")))?;
        Ok((AbiValue::String(s.to_string()), next))
    }
}

// ---------------------------------------------------------------------------
// RawSliceCoder
// ---------------------------------------------------------------------------

const RAW_SLICE_LABELS: BlobLabels = BlobLabels {
    header: "raw slice",
    payload: "raw slice byte",
};

/// `raw untyped slice`: count of words, then the words.
#[derive(Debug, Clone, Default)]
pub struct RawSliceCoder;

impl RawSliceCoder {
    pub fn new() -> Self {
        Self
    }
}

impl Coder for RawSliceCoder {
    fn kind(&self) -> CoderKind {
        CoderKind::RawSlice
    }

    fn type_label(&self) -> &str {
        "raw untyped slice"
    }

    fn encoded_length(&self) -> EncodedLength {
        EncodedLength::Dynamic { min: WORD_SIZE }
    }

    fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()> {
        let words: Vec<u64> = match value {
            AbiValue::RawSlice(words) => words.clone(),
            AbiValue::Array(items) => items
                .iter()
                .map(AbiValue::as_u64)
                .collect::<Option<_>>()
                .ok_or_else(|| AbiError::encode("Expected array of words for raw slice."))?,
            _ => return Err(AbiError::encode("Expected array value.")),
        };
        let payload: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
        write_prefixed(out, words.len(), &payload, false);
        Ok(())
    }

    fn decode(&self, data: &[u8], offset: usize) -> AbiResult<(AbiValue, usize)> {
        let (payload, next) = read_prefixed(data, offset, WORD_SIZE, false, &RAW_SLICE_LABELS)?;
        let words = payload
            .chunks_exact(WORD_SIZE)
            .map(|chunk| {
                let mut word = [0u8; WORD_SIZE];
                word.copy_from_slice(chunk);
                u64::from_be_bytes(word)
            })
            .collect();
        Ok((AbiValue::RawSlice(words), next))
    }
}
