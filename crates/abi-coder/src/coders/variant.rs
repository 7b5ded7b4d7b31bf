// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tagged unions: `enum` and its `Option` specialisation.
//!
//! The discriminant is the case position, written as one word. Two layouts
//! exist:
//!
//! - **Padded**: every case is fixed-width; the payload is left-padded to the
//!   widest case so all values encode to the same size.
//! - **Compact**: the payload is exactly the active case's encoding.

use super::{read_bytes, read_uint, write_uint, Coder, CoderKind, EncodedLength};
use crate::constants::{OPTION_NONE, OPTION_SOME, WORD_SIZE};
use crate::error::{AbiError, AbiResult};
use crate::value::AbiValue;

/// Payload layout of a variant coder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantLayout {
    /// Payload left-padded to `payload_width`.
    Padded { payload_width: usize },
    /// Payload is the active case only.
    Compact,
}

// ---------------------------------------------------------------------------
// VariantCoder
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct VariantCoder {
    label: String,
    cases: Vec<(String, Box<dyn Coder>)>,
    layout: VariantLayout,
}

impl VariantCoder {
    /// Enum `name` with ordered `cases`.
    ///
    /// `padded` requests the padded layout; it is used only when every case
    /// has a fixed width.
    pub fn new(name: &str, cases: Vec<(String, Box<dyn Coder>)>, padded: bool) -> Self {
        let widths: Option<Vec<usize>> = cases
            .iter()
            .map(|(_, c)| c.encoded_length().fixed())
            .collect();
        let layout = match widths {
            Some(widths) if padded => VariantLayout::Padded {
                payload_width: widths.into_iter().max().unwrap_or(0),
            },
            _ => VariantLayout::Compact,
        };
        Self {
            label: format!("enum {name}"),
            cases,
            layout,
        }
    }

    pub fn layout(&self) -> VariantLayout {
        self.layout
    }

    /// Case names in discriminant order.
    pub fn case_names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|(name, _)| name.as_str())
    }

    fn case_list(&self, sep: &str, quote: &str) -> String {
        self.case_names()
            .map(|n| format!("{quote}{n}{quote}"))
            .collect::<Vec<_>>()
            .join(sep)
    }

    /// Encode case `index` carrying `value`.
    fn encode_case(&self, index: usize, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()> {
        let (_, coder) = &self.cases[index];
        write_uint(out, index as u64, WORD_SIZE);
        match self.layout {
            VariantLayout::Padded { payload_width } => {
                let width = coder.encoded_length().min();
                out.resize(out.len() + (payload_width - width), 0);
                coder.encode_into(value, out)
            }
            VariantLayout::Compact => coder.encode_into(value, out),
        }
    }

    /// Decode to `(case index, payload, next offset)`.
    fn decode_case(&self, data: &[u8], offset: usize) -> AbiResult<(usize, AbiValue, usize)> {
        let tag = read_bytes(data, offset, WORD_SIZE, "enum")?;
        let raw = read_uint(tag).unwrap_or(u64::MAX);
        let index = usize::try_from(raw)
            .ok()
            .filter(|&i| i < self.cases.len())
            .ok_or_else(|| {
                AbiError::decode(format!(
                    "Invalid caseIndex \"{}\". Valid cases: {}.",
                    raw,
                    self.case_list(",", "")
                ))
            })?;

        let (_, coder) = &self.cases[index];
        let start = offset + WORD_SIZE;
        match self.layout {
            VariantLayout::Padded { payload_width } => {
                read_bytes(data, start, payload_width, "enum")?;
                let width = coder.encoded_length().min();
                let (value, _) = coder.decode(data, start + (payload_width - width))?;
                Ok((index, value, start + payload_width))
            }
            VariantLayout::Compact => {
                let (value, next) = coder.decode(data, start)?;
                Ok((index, value, next))
            }
        }
    }
}

impl Coder for VariantCoder {
    fn kind(&self) -> CoderKind {
        CoderKind::Enum
    }

    fn type_label(&self) -> &str {
        &self.label
    }

    fn encoded_length(&self) -> EncodedLength {
        match self.layout {
            VariantLayout::Padded { payload_width } => {
                EncodedLength::Fixed(WORD_SIZE + payload_width)
            }
            VariantLayout::Compact => EncodedLength::Dynamic {
                min: WORD_SIZE
                    + self
                        .cases
                        .iter()
                        .map(|(_, c)| c.encoded_length().min())
                        .min()
                        .unwrap_or(0),
            },
        }
    }

    fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()> {
        let record = value.as_record().ok_or_else(|| {
            AbiError::encode(format!(
                "Invalid {}: expected record value, got {}.",
                self.label,
                value.type_name()
            ))
        })?;

        let mut entries = record.iter();
        let (case, payload) = match (entries.next(), entries.next()) {
            (None, _) => return Err(AbiError::decode("A field for the case must be provided.")),
            (Some(entry), None) => entry,
            (Some(_), Some(_)) => return Err(AbiError::decode("Only one field must be provided.")),
        };

        let index = self
            .cases
            .iter()
            .position(|(name, _)| name == case)
            .ok_or_else(|| {
                AbiError::encode(format!(
                    "Invalid case '{}'. Valid cases: {}.",
                    case,
                    self.case_list(", ", "'")
                ))
            })?;
        self.encode_case(index, payload, out)
    }

    fn decode(&self, data: &[u8], offset: usize) -> AbiResult<(AbiValue, usize)> {
        let (index, value, next) = self.decode_case(data, offset)?;
        Ok((AbiValue::variant(self.cases[index].0.clone(), value), next))
    }
}

// ---------------------------------------------------------------------------
// OptionCoder
// ---------------------------------------------------------------------------

/// `Option<T>` on top of a two-case variant: position 0 is `None`,
/// position 1 is `Some`.
#[derive(Debug)]
pub struct OptionCoder {
    inner: VariantCoder,
}

impl OptionCoder {
    /// Fails with `InvalidComponent` unless `inner` has exactly two cases.
    pub fn new(inner: VariantCoder) -> AbiResult<Self> {
        if inner.cases.len() != 2 {
            return Err(AbiError::InvalidComponent(format!(
                "The provided Option type must have exactly two cases, found {}.",
                inner.cases.len()
            )));
        }
        Ok(Self { inner })
    }

    /// `Option<T>` with the canonical `None`/`Some` case names.
    pub fn with_payload(some: Box<dyn Coder>, unit: Box<dyn Coder>, padded: bool) -> Self {
        let inner = VariantCoder::new(
            "Option",
            vec![(OPTION_NONE.to_string(), unit), (OPTION_SOME.to_string(), some)],
            padded,
        );
        Self { inner }
    }

    pub fn layout(&self) -> VariantLayout {
        self.inner.layout
    }
}

impl Coder for OptionCoder {
    fn kind(&self) -> CoderKind {
        CoderKind::Option
    }

    fn type_label(&self) -> &str {
        self.inner.type_label()
    }

    fn encoded_length(&self) -> EncodedLength {
        self.inner.encoded_length()
    }

    fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()> {
        match value {
            AbiValue::Option(None) => self.inner.encode_case(0, &AbiValue::unit(), out),
            AbiValue::Option(Some(v)) => self.inner.encode_case(1, v, out),
            // Record form `{ "Some": v }` / `{ "None": () }`.
            AbiValue::Record(_) => self.inner.encode_into(value, out),
            other => Err(AbiError::encode(format!(
                "Invalid {}: expected option value, got {}.",
                self.inner.label,
                other.type_name()
            ))),
        }
    }

    fn decode(&self, data: &[u8], offset: usize) -> AbiResult<(AbiValue, usize)> {
        let (index, value, next) = self.inner.decode_case(data, offset)?;
        let option = match index {
            0 => AbiValue::Option(None),
            _ => AbiValue::Option(Some(Box::new(value))),
        };
        Ok((option, next))
    }
}
