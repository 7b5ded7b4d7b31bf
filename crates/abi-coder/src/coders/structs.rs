// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Named fields in declaration order, optionally word-padded.

use super::{decode_child, encode_child, read_bytes, Coder, CoderKind, EncodedLength};
use crate::error::{AbiError, AbiResult};
use crate::value::AbiValue;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct StructCoder {
    label: String,
    fields: Vec<(String, Box<dyn Coder>)>,
    padded: bool,
}

impl StructCoder {
    /// Struct `name` with `fields`, each padded to a word when `padded`.
    pub fn new(name: &str, fields: Vec<(String, Box<dyn Coder>)>, padded: bool) -> Self {
        Self {
            label: format!("struct {name}"),
            fields,
            padded,
        }
    }

    /// Field names, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl Coder for StructCoder {
    fn kind(&self) -> CoderKind {
        CoderKind::Struct
    }

    fn type_label(&self) -> &str {
        &self.label
    }

    fn encoded_length(&self) -> EncodedLength {
        EncodedLength::sum(
            self.fields.iter().map(|(_, c)| c.encoded_length()),
            self.padded,
        )
    }

    fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> AbiResult<()> {
        let record = value.as_record().ok_or_else(|| {
            AbiError::encode(format!(
                "Invalid {}: expected record value, got {}.",
                self.label,
                value.type_name()
            ))
        })?;

        let unknown: Vec<&str> = record
            .keys()
            .map(String::as_str)
            .filter(|key| !self.fields.iter().any(|(name, _)| name == key))
            .collect();
        if !unknown.is_empty() {
            return Err(AbiError::encode(format!(
                "Invalid {}. Unknown field(s): \"{}\".",
                self.label,
                unknown.join("\", \"")
            )));
        }

        let absent = AbiValue::Option(None);
        for (name, coder) in &self.fields {
            // An omitted Option field encodes as None.
            let field_value = match record.get(name) {
                Some(v) => v,
                None if coder.kind() == CoderKind::Option => &absent,
                None => {
                    return Err(AbiError::encode(format!(
                        "Invalid {}. Field \"{}\" not present.",
                        self.label, name
                    )))
                }
            };
            encode_child(coder.as_ref(), field_value, out, self.padded)?;
        }
        Ok(())
    }

    fn decode(&self, data: &[u8], offset: usize) -> AbiResult<(AbiValue, usize)> {
        if let EncodedLength::Fixed(total) = self.encoded_length() {
            read_bytes(data, offset, total, "struct")?;
        }

        let mut record = BTreeMap::new();
        let mut next = offset;
        for (name, coder) in &self.fields {
            let (field_value, after) =
                decode_child(coder.as_ref(), data, next, self.padded, "struct")?;
            record.insert(name.clone(), field_value);
            next = after;
        }
        Ok((AbiValue::Record(record), next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coders::{
        BooleanCoder, NumberCoder, NumberKind, OptionCoder, StringCoder, TupleCoder,
    };

    fn point(padded: bool, width: usize) -> StructCoder {
        StructCoder::new(
            "Point",
            vec![
                (
                    "x".to_string(),
                    Box::new(NumberCoder::new(NumberKind::U8, width, "u8")) as Box<dyn Coder>,
                ),
                ("label".to_string(), Box::new(StringCoder::new(3))),
                ("ok".to_string(), Box::new(BooleanCoder::new(width))),
            ],
            padded,
        )
    }

    fn point_value() -> AbiValue {
        AbiValue::record([
            ("x", AbiValue::U8(4)),
            ("label", "abc".into()),
            ("ok", true.into()),
        ])
    }

    #[test]
    fn test_padded_layout() {
        let coder = point(true, 8);
        assert_eq!(coder.encoded_length(), EncodedLength::Fixed(24));

        let encoded = coder.encode(&point_value()).expect("encode");
        assert_eq!(encoded.len(), 24);
        assert_eq!(&encoded[0..8], &[0, 0, 0, 0, 0, 0, 0, 4]);
        assert_eq!(&encoded[8..16], &[b'a', b'b', b'c', 0, 0, 0, 0, 0]);
        assert_eq!(encoded[23], 1);
        assert_eq!(coder.decode(&encoded, 0), Ok((point_value(), 24)));
    }

    #[test]
    fn test_compact_layout() {
        let coder = point(false, 1);
        assert_eq!(coder.encoded_length(), EncodedLength::Fixed(5));
        let encoded = coder.encode(&point_value()).expect("encode");
        assert_eq!(encoded, [4, b'a', b'b', b'c', 1]);
        assert_eq!(coder.decode(&encoded, 0), Ok((point_value(), 5)));
    }

    #[test]
    fn test_missing_field() {
        let coder = point(false, 1);
        let value = AbiValue::record([("x", AbiValue::U8(4))]);
        assert_eq!(
            coder.encode(&value),
            Err(AbiError::Encode(
                "Invalid struct Point. Field \"label\" not present.".into()
            ))
        );
    }

    #[test]
    fn test_unknown_field() {
        let coder = StructCoder::new(
            "Settings",
            vec![(
                "maybe".to_string(),
                Box::new(OptionCoder::with_payload(
                    Box::new(BooleanCoder::new(1)),
                    Box::new(TupleCoder::new(Vec::new(), false)),
                    false,
                )) as Box<dyn Coder>,
            )],
            false,
        );
        assert_eq!(coder.encode(&AbiValue::Record(BTreeMap::new())), Ok(vec![0; 8]));

        let typo = AbiValue::record([("mayb", AbiValue::Option(Some(Box::new(true.into()))))]);
        assert_eq!(
            coder.encode(&typo),
            Err(AbiError::Encode(
                "Invalid struct Settings. Unknown field(s): \"mayb\".".into()
            ))
        );
    }

    #[test]
    fn test_short_buffer() {
        let coder = point(true, 8);
        assert_eq!(
            coder.decode(&[0; 16], 0),
            Err(AbiError::Decode("Invalid struct data size.".into()))
        );
    }
}
