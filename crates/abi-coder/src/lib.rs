// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary ABI codec for a 64-bit word VM.
//!
//! Converts native values to and from the VM's argument/return encoding,
//! driven by a JSON ABI schema that describes types by id.
//!
//! # Features
//!
//! - **Type resolution**: generic parameters are substituted so every coder
//!   sees concrete types
//! - **Composable coders**: primitives, fixed arrays, tuples, structs,
//!   `str[N]`, `Vec`, `Bytes`, `String`, raw slices, enums and `Option`
//! - **Two encoding versions**: legacy word-aligned (`"0"`) and compact
//!   natural-width (`"1"`)
//! - **Coder cache**: built trees are shared through an LRU cache
//!
//! # Architecture
//!
//! ```text
//!   JsonAbi + AbiArgument
//!        |
//!        v
//!   ResolvedAbiType (generics substituted)
//!        |
//!        v
//!   build_coder(options) -> Box<dyn Coder>   (cached by AbiCoder)
//!        |
//!        v
//!   encode(AbiValue) -> bytes / decode(bytes, offset) -> (AbiValue, offset)
//! ```
//!
//! # Example
//!
//! ```
//! use abi_coder::{AbiArgument, AbiCoder, AbiValue};
//!
//! let schema = r#"{
//!     "encoding": "1",
//!     "types": [
//!         { "typeId": 0, "type": "u8" },
//!         { "typeId": 1, "type": "bool" },
//!         { "typeId": 2, "type": "struct Flag",
//!           "components": [
//!             { "name": "id", "type": 0 },
//!             { "name": "set", "type": 1 }
//!           ] }
//!     ]
//! }"#;
//!
//! let codec = AbiCoder::from_json(schema).unwrap();
//! let value = AbiValue::record([("id", AbiValue::U8(7)), ("set", true.into())]);
//! let bytes = codec.encode(&AbiArgument::new(2), &value).unwrap();
//! assert_eq!(bytes, [7, 1]);
//! assert_eq!(codec.decode(&AbiArgument::new(2), &bytes, 0).unwrap(), (value, 2));
//! ```

pub mod abi;
pub mod cache;
pub mod codec;
pub mod coders;
pub mod config;
pub mod constants;
pub mod error;
pub mod factory;
pub mod value;

pub use abi::{AbiArgument, AbiTypeDeclaration, JsonAbi, ResolvedAbiType, TypeLookup, TypeShape};
pub use cache::{CacheStats, CoderCache};
pub use codec::{decode, encode, AbiCoder};
pub use coders::{Coder, CoderKind, EncodedLength};
pub use config::{CodecConfig, EncodingOptions, EncodingVersion};
pub use constants::{MAX_BYTES, WORD_SIZE};
pub use error::{AbiError, AbiResult};
pub use factory::build_coder;
pub use value::AbiValue;
