// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `str[N]`: exactly N raw bytes.

use super::{read_bytes, Coder, CoderKind, EncodedLength};
use crate::error::{AbiError, AbiResult};
use crate::value::AbiValue;

#[derive(Debug, Clone)]
pub struct StringCoder {
    length: usize,
    label: String,
}

impl StringCoder {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            label: format!("str[{length}]"),
        }
    }
}

impl Coder for StringCoder {
    fn kind(&self) -> CoderKind {
        CoderKind::String
    }

    fn type_label(&self) -> &str {
        &self.label
    }

    fn encoded_length(&self) -> EncodedLength {
        EncodedLength::Fixed(self.length)
    }

    fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()> {
        let s = value
            .as_str()
            .ok_or_else(|| AbiError::encode(format!("Expected string value for {}.", self.label)))?;
        if s.len() != self.length {
            return Err(AbiError::encode(format!(
                "Value length mismatch during encode: {} expects {} bytes, got {}.",
                self.label,
                self.length,
                s.len()
            )));
        }
        out.extend_from_slice(s.as_bytes());
        Ok(())
    }

    fn decode(&self, data: &[u8], offset: usize) -> AbiResult<(AbiValue, usize)> {
        let bytes = read_bytes(data, offset, self.length, "string")?;
        let s = std::str::from_utf8(bytes)
            .map_err(|e| AbiError::decode(format!("Invalid UTF-8 in {}: {e}", self.label)))?;
        Ok((AbiValue::String(s.to_string()), offset + self.length))
    }
}
