// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec configuration and per-subtree encoding options.
//!
//! Two layers:
//!
//! - [`CodecConfig`]: long-lived settings of an [`AbiCoder`](crate::AbiCoder),
//!   loadable from JSON.
//! - [`EncodingOptions`]: transient context threaded through coder-tree
//!   construction. Never stored on a coder.
//!
//! The encoding version of a top-level call is picked in this order:
//! explicit options, then `CodecConfig::encoding`, then the schema's own
//! `encoding` field, then [`EncodingVersion::Legacy`].

use crate::constants::MAX_BYTES;
use crate::error::{AbiError, AbiResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// EncodingVersion
// ---------------------------------------------------------------------------

/// Layout strategy applied to a coder subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EncodingVersion {
    /// Version `"0"`: every scalar occupies a word, composites are padded,
    /// variants have a fixed width.
    #[default]
    Legacy,
    /// Version `"1"`: scalars use their natural width, dynamic payloads
    /// and variants are unpadded.
    Compact,
}

impl EncodingVersion {
    /// The version string used in schemas.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "0",
            Self::Compact => "1",
        }
    }

    /// Width of an unsigned integer of `natural` bytes.
    pub(crate) fn integer_width(self, natural: usize, is_small_bytes: bool) -> usize {
        match self {
            Self::Legacy if is_small_bytes && natural == 1 => 1,
            Self::Legacy => crate::constants::WORD_SIZE.max(natural),
            Self::Compact => natural,
        }
    }

    /// Whether dynamic payloads and fields are right-padded to a word.
    pub(crate) fn pads(self) -> bool {
        matches!(self, Self::Legacy)
    }
}

impl fmt::Display for EncodingVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingVersion {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::Legacy),
            "1" => Ok(Self::Compact),
            other => Err(AbiError::UnsupportedEncodingVersion(other.to_string())),
        }
    }
}

impl TryFrom<String> for EncodingVersion {
    type Error = AbiError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EncodingVersion> for String {
    fn from(v: EncodingVersion) -> Self {
        v.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// EncodingOptions
// ---------------------------------------------------------------------------

/// Construction context for one coder subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EncodingOptions {
    /// Layout rules for this subtree.
    pub encoding: EncodingVersion,
    /// The coder is a struct field or tuple slot and pads to a word.
    pub is_right_padded: bool,
    /// The coder is an element of a packed sequence.
    pub is_small_bytes: bool,
}

impl EncodingOptions {
    /// Top-level options for `encoding`.
    pub fn new(encoding: EncodingVersion) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    /// Options for struct fields.
    pub(crate) fn field(self) -> Self {
        Self {
            encoding: self.encoding,
            is_right_padded: true,
            is_small_bytes: false,
        }
    }

    /// Options for fixed array elements.
    pub(crate) fn array_element(self) -> Self {
        Self {
            encoding: self.encoding,
            is_right_padded: false,
            is_small_bytes: true,
        }
    }

    /// Options for `Vec` elements: always the legacy layout.
    ///
    /// Under `Compact` this keeps u16/u32 elements word-wide; only u8 and
    /// bool shrink to one byte through `is_small_bytes`. Decoders of compact
    /// `Vec<u16>`/`Vec<u32>` payloads must expect 8-byte elements.
    pub(crate) fn vec_element(self) -> Self {
        Self {
            encoding: EncodingVersion::Legacy,
            is_right_padded: false,
            is_small_bytes: true,
        }
    }

    /// Options for tuple slots: always the legacy layout, padded, so tuple
    /// slots stay word-wide under `Compact` as well.
    pub(crate) fn tuple_slot(self) -> Self {
        Self {
            encoding: EncodingVersion::Legacy,
            is_right_padded: true,
            is_small_bytes: false,
        }
    }

    /// Options for enum cases.
    pub(crate) fn variant_case(self) -> Self {
        Self::new(self.encoding)
    }

    /// Whether children built with these options pad to a word.
    pub(crate) fn pads_children(self) -> bool {
        self.is_right_padded && self.encoding.pads()
    }
}

// ---------------------------------------------------------------------------
// CodecConfig
// ---------------------------------------------------------------------------

fn default_max_bytes() -> usize {
    MAX_BYTES
}

fn default_cache_capacity() -> usize {
    256
}

/// Settings of an [`AbiCoder`](crate::AbiCoder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodecConfig {
    /// Forced encoding version (`None` defers to the schema).
    #[serde(default)]
    pub encoding: Option<EncodingVersion>,

    /// Buffers longer than this are rejected before decoding.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Number of coder trees kept in the cache (0 disables caching).
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            encoding: None,
            max_bytes: default_max_bytes(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl CodecConfig {
    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> AbiResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> AbiResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Force an encoding version.
    #[must_use]
    pub fn with_encoding(mut self, encoding: EncodingVersion) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Set the decode size ceiling.
    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Set the cache capacity.
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    fn validate(&self) -> AbiResult<()> {
        if self.max_bytes == 0 {
            return Err(AbiError::Schema("maxBytes must be greater than 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        assert_eq!("0".parse::<EncodingVersion>(), Ok(EncodingVersion::Legacy));
        assert_eq!("1".parse::<EncodingVersion>(), Ok(EncodingVersion::Compact));
        assert_eq!(
            "2".parse::<EncodingVersion>(),
            Err(AbiError::UnsupportedEncodingVersion("2".into()))
        );
    }

    #[test]
    fn test_integer_width() {
        let legacy = EncodingVersion::Legacy;
        assert_eq!(legacy.integer_width(1, false), 8);
        assert_eq!(legacy.integer_width(1, true), 1);
        assert_eq!(legacy.integer_width(4, true), 8);

        let compact = EncodingVersion::Compact;
        assert_eq!(compact.integer_width(2, false), 2);
        assert_eq!(compact.integer_width(8, true), 8);
    }

    #[test]
    fn test_child_options() {
        let top = EncodingOptions::new(EncodingVersion::Compact);
        assert!(top.field().is_right_padded);
        assert!(!top.field().pads_children());
        assert_eq!(top.vec_element().encoding, EncodingVersion::Legacy);
        assert!(top.tuple_slot().pads_children());
        assert!(top.array_element().is_small_bytes);
        assert_eq!(top.variant_case(), top);
    }

    #[test]
    fn test_config_from_json_defaults() {
        let config = CodecConfig::from_json("{}").expect("config");
        assert_eq!(config, CodecConfig::default());

        let config = CodecConfig::from_json(r#"{"encoding":"1","maxBytes":1024}"#).expect("config");
        assert_eq!(config.encoding, Some(EncodingVersion::Compact));
        assert_eq!(config.max_bytes, 1024);
        assert_eq!(config.cache_capacity, 256);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(CodecConfig::from_json(r#"{"encoding":"7"}"#).is_err());
        assert!(CodecConfig::from_json(r#"{"maxBytes":0}"#).is_err());
    }

    #[test]
    fn test_config_from_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("codec.json");
        std::fs::write(&path, r#"{"cacheCapacity":0}"#).expect("write");

        let config = CodecConfig::from_path(&path).expect("config");
        assert_eq!(config.cache_capacity, 0);
    }
}
