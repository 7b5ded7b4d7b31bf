// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Coder factory: resolved type + options -> coder tree.

use crate::abi::{ResolvedAbiType, TypeShape};
use crate::coders::{
    ArrayCoder, BooleanCoder, ByteCoder, Coder, FixedBytesCoder, NumberCoder, NumberKind,
    OptionCoder, RawSliceCoder, StdStringCoder, StringCoder, StructCoder, TupleCoder,
    VariantCoder, VecCoder,
};
use crate::config::EncodingOptions;
use crate::constants::{
    RAW_PTR_TYPE, U16_TYPE, U32_TYPE, U64_TYPE, U8_TYPE, VEC_BUFFER_COMPONENT, WORD_SIZE,
};
use crate::error::{AbiError, AbiResult};

/// Build the coder tree for `resolved` under `options`.
///
/// Dispatch follows [`TypeShape`]; every child is built recursively with the
/// options its position dictates (array elements packed, `Vec` elements and
/// tuple slots on the legacy layout, struct fields right-padded).
pub fn build_coder(
    resolved: &ResolvedAbiType<'_>,
    options: EncodingOptions,
) -> AbiResult<Box<dyn Coder>> {
    let version = options.encoding;
    let coder: Box<dyn Coder> = match resolved.shape() {
        TypeShape::U8 => number(NumberKind::U8, options, U8_TYPE),
        TypeShape::U16 => number(NumberKind::U16, options, U16_TYPE),
        TypeShape::U32 => number(NumberKind::U32, options, U32_TYPE),
        TypeShape::U64 => number(NumberKind::U64, options, U64_TYPE),
        TypeShape::RawPtr => Box::new(NumberCoder::new(NumberKind::U64, WORD_SIZE, RAW_PTR_TYPE)),
        TypeShape::RawSlice => Box::new(RawSliceCoder::new()),
        TypeShape::Bool => Box::new(BooleanCoder::new(
            version.integer_width(1, options.is_small_bytes),
        )),
        TypeShape::B256 => Box::new(FixedBytesCoder::b256()),
        TypeShape::B512 => Box::new(FixedBytesCoder::b512()),
        TypeShape::Bytes => Box::new(ByteCoder::new(version.pads())),
        TypeShape::StdString => Box::new(StdStringCoder::new(version.pads())),
        TypeShape::FixedString(len) => Box::new(StringCoder::new(len)),
        TypeShape::Array(len) => {
            let element = resolved.components().first().ok_or_else(|| {
                AbiError::InvalidComponent(
                    "The provided Array type is missing an item of 'component'.".into(),
                )
            })?;
            let element = build_coder(element, options.array_element())?;
            Box::new(ArrayCoder::new(element, len, resolved.type_field.clone())?)
        }
        TypeShape::Vec => build_vec(resolved, options)?,
        TypeShape::Struct(name) => {
            let field_options = options.field();
            let fields = build_named(resolved, field_options)?;
            Box::new(StructCoder::new(
                &name,
                fields,
                field_options.pads_children(),
            ))
        }
        TypeShape::Option => {
            let cases = build_named(resolved, options.variant_case())?;
            let inner = VariantCoder::new("Option", cases, version.pads());
            Box::new(OptionCoder::new(inner)?)
        }
        TypeShape::Enum(name) => {
            let cases = build_named(resolved, options.variant_case())?;
            Box::new(VariantCoder::new(&name, cases, version.pads()))
        }
        TypeShape::Tuple => {
            let slot_options = options.tuple_slot();
            let slots = resolved
                .components()
                .iter()
                .map(|c| build_coder(c, slot_options))
                .collect::<AbiResult<Vec<_>>>()?;
            Box::new(TupleCoder::new(slots, slot_options.pads_children()))
        }
        TypeShape::StrSlice => {
            return Err(AbiError::InvalidData(
                "String slices can not be decoded from logs. \
                 Convert the slice to `str[N]` with `__to_str_array`"
                    .into(),
            ))
        }
        TypeShape::Generic(_) | TypeShape::Unknown => {
            return Err(AbiError::CoderNotFound(format!(
                "Coder not found: {}.",
                resolved.to_json()
            )))
        }
    };

    log::trace!(
        "[abi] built {} coder for '{}' ({})",
        version,
        resolved.type_field,
        coder.encoded_length()
    );
    Ok(coder)
}

fn number(kind: NumberKind, options: EncodingOptions, label: &str) -> Box<dyn Coder> {
    let width = options
        .encoding
        .integer_width(kind.size(), options.is_small_bytes);
    Box::new(NumberCoder::new(kind, width, label))
}

/// One coder per component, keyed by component name.
fn build_named(
    resolved: &ResolvedAbiType<'_>,
    options: EncodingOptions,
) -> AbiResult<Vec<(String, Box<dyn Coder>)>> {
    resolved
        .components()
        .iter()
        .map(|c| Ok((c.name.clone(), build_coder(c, options)?)))
        .collect()
}

/// `Vec<T>`: the element type is the sole type argument of the `buf`
/// component.
fn build_vec(
    resolved: &ResolvedAbiType<'_>,
    options: EncodingOptions,
) -> AbiResult<Box<dyn Coder>> {
    let buf = resolved
        .components()
        .iter()
        .find(|c| c.name == VEC_BUFFER_COMPONENT)
        .ok_or_else(|| {
            AbiError::InvalidComponent(format!(
                "The provided Vec type is missing the '{VEC_BUFFER_COMPONENT}' component."
            ))
        })?;
    let argument = buf
        .original_type_arguments
        .as_ref()
        .and_then(|args| args.first())
        .ok_or_else(|| {
            AbiError::InvalidComponent(
                "The provided Vec type is missing the 'type argument'.".into(),
            )
        })?;

    let element_type = ResolvedAbiType::nested(resolved.abi(), argument, buf.depth() + 1)?;
    let element = build_coder(&element_type, options.vec_element())?;
    Ok(Box::new(VecCoder::new(element, options.encoding.pads())?))
}
