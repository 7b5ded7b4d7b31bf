// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire format constants and canonical type names.

/// Alignment unit and length-prefix width, in bytes.
pub const WORD_SIZE: usize = 8;

/// Width of the `b256` block.
pub const B256_SIZE: usize = 32;

/// Width of the `B512` block.
pub const B512_SIZE: usize = 64;

/// Largest byte sequence a dynamic coder accepts for decoding.
pub const MAX_BYTES: usize = (1 << 32) - 1;

/// Upper bound on item counts whose elements occupy no bytes.
pub const MAX_ZERO_WIDTH_ITEMS: usize = 1 << 16;

/// Deepest component nesting a schema may resolve to.
pub const MAX_NESTING_DEPTH: usize = 64;

pub const U8_TYPE: &str = "u8";
pub const U16_TYPE: &str = "u16";
pub const U32_TYPE: &str = "u32";
pub const U64_TYPE: &str = "u64";
pub const BOOL_TYPE: &str = "bool";
pub const B256_TYPE: &str = "b256";
pub const RAW_PTR_TYPE: &str = "raw untyped ptr";
pub const RAW_SLICE_TYPE: &str = "raw untyped slice";
pub const STR_SLICE_TYPE: &str = "str";

/// Builtin struct/enum names, bare and std-qualified.
pub const B512_NAMES: [&str; 2] = ["B512", "std::b512::B512"];
pub const BYTES_NAMES: [&str; 2] = ["Bytes", "std::bytes::Bytes"];
pub const STD_STRING_NAMES: [&str; 2] = ["String", "std::string::String"];
pub const VEC_NAMES: [&str; 2] = ["Vec", "std::vec::Vec"];
pub const OPTION_NAMES: [&str; 2] = ["Option", "std::option::Option"];

/// Name of the `Vec` component holding the element type argument.
pub const VEC_BUFFER_COMPONENT: &str = "buf";

/// Case names of the `Option` enum, in discriminant order.
pub const OPTION_NONE: &str = "None";
pub const OPTION_SOME: &str = "Some";

/// Number of zero bytes needed to pad `len` up to the next word boundary.
#[inline]
pub const fn word_padding(len: usize) -> usize {
    (WORD_SIZE - (len % WORD_SIZE)) % WORD_SIZE
}

/// Round `len` up to the next multiple of [`WORD_SIZE`].
#[inline]
pub const fn round_up_to_word(len: usize) -> usize {
    len + word_padding(len)
}
