// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `[T; N]`: N element encodings back to back.

use super::{read_bytes, Coder, CoderKind, EncodedLength};
use crate::constants::{MAX_BYTES, MAX_ZERO_WIDTH_ITEMS};
use crate::error::{AbiError, AbiResult};
use crate::value::AbiValue;

#[derive(Debug)]
pub struct ArrayCoder {
    element: Box<dyn Coder>,
    length: usize,
    label: String,
}

impl ArrayCoder {
    /// `length` copies of `element`.
    ///
    /// Fails with `InvalidComponent` when the encoded size would exceed
    /// [`MAX_BYTES`], or when zero-width elements are repeated more than
    /// [`MAX_ZERO_WIDTH_ITEMS`] times.
    pub fn new(
        element: Box<dyn Coder>,
        length: usize,
        label: impl Into<String>,
    ) -> AbiResult<Self> {
        let label = label.into();
        let element_min = element.encoded_length().min();
        let within_bounds = match element_min {
            0 => length <= MAX_ZERO_WIDTH_ITEMS,
            n => n.checked_mul(length).is_some_and(|total| total <= MAX_BYTES),
        };
        if !within_bounds {
            return Err(AbiError::InvalidComponent(format!(
                "The provided {label} type is too large: {length} items of {} bytes.",
                element_min
            )));
        }
        Ok(Self {
            element,
            length,
            label,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Coder for ArrayCoder {
    fn kind(&self) -> CoderKind {
        CoderKind::Array
    }

    fn type_label(&self) -> &str {
        &self.label
    }

    fn encoded_length(&self) -> EncodedLength {
        match self.element.encoded_length() {
            EncodedLength::Fixed(n) => EncodedLength::Fixed(n.saturating_mul(self.length)),
            EncodedLength::Dynamic { min } => EncodedLength::Dynamic {
                min: min.saturating_mul(self.length),
            },
        }
    }

    fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()> {
        let items = value
            .as_sequence()
            .ok_or_else(|| AbiError::encode("Expected array value."))?;
        if items.len() != self.length {
            return Err(AbiError::encode(format!(
                "Types/values length mismatch: {} expects {} items, got {}.",
                self.label,
                self.length,
                items.len()
            )));
        }
        items
            .iter()
            .try_for_each(|item| self.element.encode_into(item, out))
    }

    fn decode(&self, data: &[u8], offset: usize) -> AbiResult<(AbiValue, usize)> {
        if let EncodedLength::Fixed(total) = self.encoded_length() {
            read_bytes(data, offset, total, "array")?;
        }

        // Zero-width items are capped at construction; others need input bytes.
        let remaining = data.len().saturating_sub(offset);
        let mut items = Vec::with_capacity(self.length.min(remaining.max(MAX_ZERO_WIDTH_ITEMS)));
        let mut next = offset;
        for _ in 0..self.length {
            let (item, after) = self.element.decode(data, next)?;
            items.push(item);
            next = after;
        }
        Ok((AbiValue::Array(items), next))
    }
}
