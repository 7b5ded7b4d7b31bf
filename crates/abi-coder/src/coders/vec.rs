// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `Vec<T>`: element count word, then the elements back to back.

use super::{read_bytes, read_word, word_to_usize, write_uint, Coder, CoderKind, EncodedLength};
use crate::constants::{word_padding, MAX_BYTES, MAX_ZERO_WIDTH_ITEMS, WORD_SIZE};
use crate::error::{AbiError, AbiResult};
use crate::value::AbiValue;

#[derive(Debug)]
pub struct VecCoder {
    element: Box<dyn Coder>,
    element_width: usize,
    pad: bool,
}

impl VecCoder {
    /// Fails with `InvalidComponent` unless `element` has a fixed width.
    pub fn new(element: Box<dyn Coder>, pad: bool) -> AbiResult<Self> {
        let element_width = element.encoded_length().fixed().ok_or_else(|| {
            AbiError::InvalidComponent(format!(
                "The provided Vec element type '{}' must have a fixed encoded length.",
                element.type_label()
            ))
        })?;
        Ok(Self {
            element,
            element_width,
            pad,
        })
    }

    pub fn element(&self) -> &dyn Coder {
        self.element.as_ref()
    }
}

impl Coder for VecCoder {
    fn kind(&self) -> CoderKind {
        CoderKind::Vec
    }

    fn type_label(&self) -> &str {
        "struct Vec"
    }

    fn encoded_length(&self) -> EncodedLength {
        EncodedLength::Dynamic {
            min: self.element_width + WORD_SIZE,
        }
    }

    fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()> {
        let items = match value {
            AbiValue::Array(items) => items,
            _ => return Err(AbiError::encode("Expected array value.")),
        };
        write_uint(out, items.len() as u64, WORD_SIZE);
        let start = out.len();
        for item in items {
            self.element.encode_into(item, out)?;
        }
        if self.pad {
            let written = out.len() - start;
            out.resize(out.len() + word_padding(written), 0);
        }
        Ok(())
    }

    fn decode(&self, data: &[u8], offset: usize) -> AbiResult<(AbiValue, usize)> {
        if data.len() > MAX_BYTES {
            return Err(AbiError::decode("Invalid vec data size."));
        }

        let count = word_to_usize(read_word(data, offset, "vec")?, "vec")?;
        let len = count
            .checked_mul(self.element_width)
            .ok_or_else(|| AbiError::decode("Invalid vec byte data size."))?;
        if self.element_width == 0 && count > MAX_ZERO_WIDTH_ITEMS {
            return Err(AbiError::decode("Invalid vec byte data size."));
        }

        let start = offset + WORD_SIZE;
        read_bytes(data, start, len, "vec byte")?;

        let mut items = Vec::with_capacity(count);
        let mut next = start;
        for _ in 0..count {
            let (item, after) = self.element.decode(data, next)?;
            items.push(item);
            next = after;
        }

        if self.pad {
            let padding = word_padding(len);
            read_bytes(data, next, padding, "vec byte")?;
            next += padding;
        }
        Ok((AbiValue::Array(items), next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coders::{ByteCoder, NumberCoder, NumberKind, TupleCoder};

    fn u8_vec(width: usize, pad: bool) -> VecCoder {
        VecCoder::new(Box::new(NumberCoder::new(NumberKind::U8, width, "u8")), pad)
            .expect("fixed element")
    }

    #[test]
    fn test_round_trip() {
        let coder = u8_vec(1, false);
        let value = AbiValue::from(vec![7u8, 8, 9]);
        let encoded = coder.encode(&value).expect("encode");
        assert_eq!(encoded, [0, 0, 0, 0, 0, 0, 0, 3, 7, 8, 9]);
        assert_eq!(coder.decode(&encoded, 0), Ok((value, 11)));
    }

    #[test]
    fn test_empty() {
        let coder = u8_vec(1, false);
        assert_eq!(coder.encoded_length(), EncodedLength::Dynamic { min: 9 });
        let encoded = coder.encode(&AbiValue::Array(Vec::new())).expect("encode");
        assert_eq!(encoded, [0; 8]);
        assert_eq!(coder.decode(&encoded, 0), Ok((AbiValue::Array(Vec::new()), 8)));
    }

    #[test]
    fn test_padded_payload() {
        let coder = u8_vec(1, true);
        let encoded = coder.encode(&AbiValue::from(vec![1u8])).expect("encode");
        assert_eq!(encoded.len(), 16);
        assert_eq!(
            coder.decode(&encoded, 0),
            Ok((AbiValue::from(vec![1u8]), 16))
        );
    }

    #[test]
    fn test_word_elements() {
        let coder = u8_vec(8, false);
        let encoded = coder.encode(&AbiValue::from(vec![1u8, 2])).expect("encode");
        assert_eq!(encoded.len(), 24);
        assert_eq!(encoded[15], 1);
        assert_eq!(encoded[23], 2);
    }

    #[test]
    fn test_decode_errors() {
        let coder = u8_vec(1, false);
        assert_eq!(
            coder.decode(&[0, 0, 0], 0),
            Err(AbiError::Decode("Invalid vec data size.".into()))
        );
        assert_eq!(
            coder.decode(&[0, 0, 0, 0, 0, 0, 0, 5, 1], 0),
            Err(AbiError::Decode("Invalid vec byte data size.".into()))
        );
    }

    #[test]
    fn test_zero_width_count_capped() {
        let coder =
            VecCoder::new(Box::new(TupleCoder::new(Vec::new(), false)), false).expect("unit");
        let small = [0, 0, 0, 0, 0, 0, 0, 2];
        assert_eq!(
            coder.decode(&small, 0),
            Ok((AbiValue::Array(vec![AbiValue::unit(), AbiValue::unit()]), 8))
        );
        assert!(coder.decode(&[0xff; 8], 0).is_err());
    }

    #[test]
    fn test_dynamic_element_rejected() {
        let err = VecCoder::new(Box::new(ByteCoder::new(false)), false).unwrap_err();
        assert!(matches!(err, AbiError::InvalidComponent(_)));
    }

    #[test]
    fn test_non_array_rejected() {
        let coder = u8_vec(1, false);
        assert_eq!(
            coder.encode(&AbiValue::U8(1)),
            Err(AbiError::Encode("Expected array value.".into()))
        );
    }
}
