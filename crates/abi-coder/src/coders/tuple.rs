// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `(T, U, ...)`: heterogeneous slots in declaration order.

use super::{decode_child, encode_child, read_bytes, Coder, CoderKind, EncodedLength};
use crate::error::{AbiError, AbiResult};
use crate::value::AbiValue;

#[derive(Debug)]
pub struct TupleCoder {
    slots: Vec<Box<dyn Coder>>,
    padded: bool,
    label: String,
}

impl TupleCoder {
    /// Tuple of `slots`, each padded to a word when `padded`.
    pub fn new(slots: Vec<Box<dyn Coder>>, padded: bool) -> Self {
        let label = format!(
            "({})",
            slots
                .iter()
                .map(|s| s.type_label())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Self {
            slots,
            padded,
            label,
        }
    }
}

impl Coder for TupleCoder {
    fn kind(&self) -> CoderKind {
        CoderKind::Tuple
    }

    fn type_label(&self) -> &str {
        &self.label
    }

    fn encoded_length(&self) -> EncodedLength {
        EncodedLength::sum(self.slots.iter().map(|s| s.encoded_length()), self.padded)
    }

    fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()> {
        let items = value
            .as_sequence()
            .ok_or_else(|| AbiError::encode("Expected tuple value."))?;
        if items.len() != self.slots.len() {
            return Err(AbiError::encode(format!(
                "Types/values length mismatch: {} expects {} items, got {}.",
                self.label,
                self.slots.len(),
                items.len()
            )));
        }
        for (slot, item) in self.slots.iter().zip(items) {
            encode_child(slot.as_ref(), item, out, self.padded)?;
        }
        Ok(())
    }

    fn decode(&self, data: &[u8], offset: usize) -> AbiResult<(AbiValue, usize)> {
        if let EncodedLength::Fixed(total) = self.encoded_length() {
            read_bytes(data, offset, total, "tuple")?;
        }

        let mut items = Vec::with_capacity(self.slots.len());
        let mut next = offset;
        for slot in &self.slots {
            let (item, after) = decode_child(slot.as_ref(), data, next, self.padded, "tuple")?;
            items.push(item);
            next = after;
        }
        Ok((AbiValue::Tuple(items), next))
    }
}
