// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Schema loading, configuration files and resolution failures.

use abi_coder::{
    AbiArgument, AbiCoder, AbiError, AbiValue, CodecConfig, CoderKind, EncodingVersion, JsonAbi,
    TypeLookup,
};
use std::io::Write;

const SCHEMA: &str = r#"{
    "types": [
        { "typeId": 0, "type": "u64" },
        { "typeId": 1, "type": "generic T" },
        { "typeId": 2, "type": "raw untyped ptr" },
        { "typeId": 3, "type": "struct std::vec::RawVec",
          "components": [
            { "name": "ptr", "type": 2 },
            { "name": "cap", "type": 0 }
          ],
          "typeParameters": [1] },
        { "typeId": 4, "type": "struct std::vec::Vec",
          "components": [
            { "name": "buf", "type": 3, "typeArguments": [{ "name": "", "type": 1 }] },
            { "name": "len", "type": 0 }
          ],
          "typeParameters": [1] },
        { "typeId": 5, "type": "u8" },
        { "typeId": 6, "type": "struct Holder",
          "components": [
            { "name": "items", "type": 4, "typeArguments": [{ "name": "", "type": 1 }] },
            { "name": "count", "type": 0 }
          ],
          "typeParameters": [1] },
        { "typeId": 7, "type": "str" },
        { "typeId": 8, "type": "struct Unsized",
          "components": [{ "name": "v", "type": 4 }],
          "typeParameters": [1] },
        { "typeId": 9, "type": "mystery" }
    ]
}"#;

fn holder_of_u8() -> AbiArgument {
    AbiArgument::new(6).with_type_arguments(vec![AbiArgument::new(5)])
}

#[test]
fn nested_generic_resolution() {
    let codec = AbiCoder::from_json(SCHEMA).expect("schema");
    let value = AbiValue::record([
        ("items", AbiValue::from(vec![1u8, 2, 3])),
        ("count", AbiValue::U64(3)),
    ]);

    let encoded = codec.encode(&holder_of_u8(), &value).expect("encode");
    // Legacy: count word, three packed bytes padded to a word, then u64.
    assert_eq!(encoded.len(), 8 + 8 + 8);
    assert_eq!(&encoded[..11], &[0, 0, 0, 0, 0, 0, 0, 3, 1, 2, 3]);
    assert_eq!(codec.decode(&holder_of_u8(), &encoded, 0), Ok((value, 24)));
}

#[test]
fn named_lookup() {
    let abi = JsonAbi::from_json(SCHEMA).expect("schema");
    assert_eq!(abi.lookup_named_type("u8").map(|d| d.type_id), Some(5));
    assert!(abi.lookup_named_type("struct Missing").is_none());
}

#[test]
fn missing_type_argument() {
    let codec = AbiCoder::from_json(SCHEMA).expect("schema");
    let err = codec.coder(&AbiArgument::new(8)).unwrap_err();
    assert!(matches!(err, AbiError::InvalidComponent(_)), "{err}");
}

#[test]
fn unknown_type_id() {
    let codec = AbiCoder::from_json(SCHEMA).expect("schema");
    assert_eq!(
        codec.coder(&AbiArgument::new(99)).unwrap_err(),
        AbiError::TypeNotFound(
            r#"Type does not exist in the provided abi: {"name":"","type":99,"typeArguments":null}"#
                .into()
        )
    );
}

#[test]
fn string_slice_rejected() {
    let codec = AbiCoder::from_json(SCHEMA).expect("schema");
    let err = codec.coder(&AbiArgument::new(7)).unwrap_err();
    assert!(matches!(err, AbiError::InvalidData(_)));
    assert!(err.message().contains("__to_str_array"));
}

#[test]
fn unknown_shape_reports_resolved_type() {
    let codec = AbiCoder::from_json(SCHEMA).expect("schema");
    assert_eq!(
        codec.coder(&AbiArgument::named("x", 9)).unwrap_err(),
        AbiError::CoderNotFound(
            r#"Coder not found: {"name":"x","type":"mystery","originalTypeArguments":null,"components":null}."#
                .into()
        )
    );
}

#[test]
fn unsupported_schema_encoding() {
    let json = SCHEMA.replacen('{', r#"{ "encoding": "7","#, 1);
    let codec = AbiCoder::from_json(&json).expect("schema parses");
    assert_eq!(
        codec.encoding(),
        Err(AbiError::UnsupportedEncodingVersion("7".into()))
    );
    assert!(codec.coder(&AbiArgument::new(0)).is_err());
}

#[test]
fn malformed_schema() {
    assert!(matches!(
        JsonAbi::from_json("{ \"types\": 3 }"),
        Err(AbiError::Schema(_))
    ));
}

#[test]
fn schema_and_config_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");

    let schema_path = dir.path().join("abi.json");
    std::fs::write(&schema_path, SCHEMA).expect("write schema");

    let config_path = dir.path().join("codec.json");
    let mut file = std::fs::File::create(&config_path).expect("create config");
    writeln!(file, r#"{{ "encoding": "1", "cacheCapacity": 0 }}"#).expect("write config");
    drop(file);

    let abi = JsonAbi::from_path(&schema_path).expect("schema");
    let config = CodecConfig::from_path(&config_path).expect("config");
    assert_eq!(config.encoding, Some(EncodingVersion::Compact));
    assert_eq!(config.max_bytes, abi_coder::MAX_BYTES);

    let codec = AbiCoder::with_config(abi, config);
    let coder = codec.coder(&AbiArgument::new(5)).expect("coder");
    assert_eq!(coder.kind(), CoderKind::Primitive);
    assert_eq!(coder.encode(&AbiValue::U8(9)), Ok(vec![9]));

    codec.coder(&AbiArgument::new(5)).expect("coder");
    assert_eq!(codec.cache_stats().hits, 0);
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = JsonAbi::from_path(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, AbiError::Schema(_)));
}

const LIMITS: &str = r#"{
    "types": [
        { "typeId": 0, "type": "u64" },
        { "typeId": 1, "type": "[u64; 2305843009213693952]",
          "components": [{ "name": "__array_element", "type": 0 }] },
        { "typeId": 2, "type": "()" },
        { "typeId": 3, "type": "[(); 1000000000000]",
          "components": [{ "name": "__array_element", "type": 2 }] },
        { "typeId": 4, "type": "str[18446744073709551615]" },
        { "typeId": 5, "type": "struct Node",
          "components": [{ "name": "next", "type": 5 }] },
        { "typeId": 6, "type": "[u64; 536870911]",
          "components": [{ "name": "__array_element", "type": 0 }] },
        { "typeId": 7, "type": "generic T" },
        { "typeId": 8, "type": "raw untyped ptr" },
        { "typeId": 9, "type": "struct RawVec",
          "components": [
            { "name": "ptr", "type": 8 },
            { "name": "cap", "type": 0 }
          ],
          "typeParameters": [7] },
        { "typeId": 10, "type": "struct Vec",
          "components": [
            { "name": "buf", "type": 9, "typeArguments": [{ "name": "", "type": 7 }] },
            { "name": "len", "type": 0 }
          ],
          "typeParameters": [7] },
        { "typeId": 11, "type": "struct Tree",
          "components": [
            { "name": "children", "type": 10, "typeArguments": [{ "name": "", "type": 11 }] }
          ] }
    ]
}"#;

#[test]
fn overflowing_array_length_is_rejected() {
    let codec = AbiCoder::from_json(LIMITS).expect("schema");
    let arg = AbiArgument::new(1);
    let value = AbiValue::Array(vec![AbiValue::U64(1)]);

    assert!(matches!(
        codec.encode(&arg, &value),
        Err(AbiError::InvalidComponent(_))
    ));
    assert!(matches!(
        codec.decode(&arg, &[0; 8], 0),
        Err(AbiError::InvalidComponent(_))
    ));
}

#[test]
fn zero_width_array_length_is_capped() {
    let codec = AbiCoder::from_json(LIMITS).expect("schema");
    let err = codec.decode(&AbiArgument::new(3), &[], 0).unwrap_err();
    assert!(matches!(err, AbiError::InvalidComponent(_)), "{err}");
}

#[test]
fn large_array_needs_backing_input() {
    // 536870911 words is just under the size limit.
    let codec = AbiCoder::from_json(LIMITS).expect("schema");
    let arg = AbiArgument::new(6);
    assert_eq!(
        codec.decode(&arg, &[0; 64], 0),
        Err(AbiError::Decode("Invalid array data size.".into()))
    );
    assert!(matches!(
        codec.encode(&arg, &AbiValue::Array(vec![AbiValue::U64(1)])),
        Err(AbiError::Encode(_))
    ));
}

#[test]
fn huge_fixed_string_fails_cleanly() {
    let codec = AbiCoder::from_json(LIMITS).expect("schema");
    let arg = AbiArgument::new(4);
    assert!(matches!(
        codec.encode(&arg, &AbiValue::from("abc")),
        Err(AbiError::Encode(_))
    ));
    assert_eq!(
        codec.decode(&arg, b"abc", 0),
        Err(AbiError::Decode("Invalid string data size.".into()))
    );
}

#[test]
fn self_referential_struct_is_rejected() {
    let codec = AbiCoder::from_json(LIMITS).expect("schema");
    let err = codec
        .encode(&AbiArgument::new(5), &AbiValue::unit())
        .unwrap_err();
    assert!(matches!(err, AbiError::InvalidComponent(_)), "{err}");
    assert!(err.message().contains("struct Node"));

    // The codec stays usable after the failure.
    assert_eq!(
        codec.encode(&AbiArgument::new(0), &AbiValue::U64(1)),
        Ok(vec![0, 0, 0, 0, 0, 0, 0, 1])
    );
}

#[test]
fn recursion_through_vec_is_rejected() {
    let codec = AbiCoder::from_json(LIMITS).expect("schema");
    let err = codec.coder(&AbiArgument::new(11)).unwrap_err();
    assert!(matches!(err, AbiError::InvalidComponent(_)), "{err}");
}
