// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Top-level encode/decode entry points.
//!
//! Two flavours:
//!
//! - [`encode`] / [`decode`]: one-shot calls on an already resolved type;
//!   the coder tree is built and dropped per call.
//! - [`AbiCoder`]: owns a schema, a [`CodecConfig`] and a [`CoderCache`],
//!   resolves arguments by id or type name and reuses coder trees.

use crate::abi::{AbiArgument, JsonAbi, ResolvedAbiType, TypeLookup};
use crate::cache::{CacheStats, CoderCache, CoderKey};
use crate::coders::Coder;
use crate::config::{CodecConfig, EncodingOptions, EncodingVersion};
use crate::constants::MAX_BYTES;
use crate::error::{AbiError, AbiResult};
use crate::factory::build_coder;
use crate::value::AbiValue;
use std::sync::Arc;

/// Encode `value` as `resolved` under `options`.
pub fn encode(
    resolved: &ResolvedAbiType<'_>,
    value: &AbiValue,
    options: EncodingOptions,
) -> AbiResult<Vec<u8>> {
    let coder = build_coder(resolved, options)?;
    coder.encode(value)
}

/// Decode one `resolved` value from `bytes` at `offset`.
///
/// Returns the value and the offset just past it.
pub fn decode(
    resolved: &ResolvedAbiType<'_>,
    bytes: &[u8],
    offset: usize,
    options: EncodingOptions,
) -> AbiResult<(AbiValue, usize)> {
    check_input_size(bytes, MAX_BYTES)?;
    let coder = build_coder(resolved, options)?;
    coder.decode(bytes, offset)
}

fn check_input_size(bytes: &[u8], max_bytes: usize) -> AbiResult<()> {
    if bytes.len() > max_bytes {
        return Err(AbiError::decode(format!(
            "Invalid data size: {} bytes exceeds the maximum of {}.",
            bytes.len(),
            max_bytes
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// AbiCoder
// ---------------------------------------------------------------------------

/// Schema-bound codec with a coder cache.
#[derive(Debug)]
pub struct AbiCoder {
    abi: JsonAbi,
    config: CodecConfig,
    cache: CoderCache,
}

impl AbiCoder {
    /// Codec over `abi` with the default configuration.
    pub fn new(abi: JsonAbi) -> Self {
        Self::with_config(abi, CodecConfig::default())
    }

    pub fn with_config(abi: JsonAbi, config: CodecConfig) -> Self {
        let cache = CoderCache::new(config.cache_capacity);
        Self { abi, config, cache }
    }

    /// Parse a JSON ABI document and wrap it with the default configuration.
    pub fn from_json(json: &str) -> AbiResult<Self> {
        Ok(Self::new(JsonAbi::from_json(json)?))
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Effective encoding version: configuration first, then the schema's
    /// declared `encoding`, then legacy.
    pub fn encoding(&self) -> AbiResult<EncodingVersion> {
        if let Some(version) = self.config.encoding {
            return Ok(version);
        }
        Ok(self.abi.encoding()?.unwrap_or_default())
    }

    /// Top-level options for the effective encoding version.
    pub fn default_options(&self) -> AbiResult<EncodingOptions> {
        Ok(EncodingOptions::new(self.encoding()?))
    }

    /// Coder tree for `argument` under the default options.
    pub fn coder(&self, argument: &AbiArgument) -> AbiResult<Arc<dyn Coder>> {
        self.coder_with(argument, self.default_options()?)
    }

    /// Coder tree for `argument` under explicit `options`.
    pub fn coder_with(
        &self,
        argument: &AbiArgument,
        options: EncodingOptions,
    ) -> AbiResult<Arc<dyn Coder>> {
        self.cache
            .get_or_try_build(CoderKey::new(argument, options), || {
                let resolved = ResolvedAbiType::new(&self.abi, argument)?;
                let coder = build_coder(&resolved, options)?;
                log::debug!(
                    "[abi] built coder {} for type {} ({}, {})",
                    coder.type_label(),
                    argument.type_id,
                    options.encoding,
                    coder.encoded_length()
                );
                Ok(coder)
            })
    }

    pub fn encode(&self, argument: &AbiArgument, value: &AbiValue) -> AbiResult<Vec<u8>> {
        self.coder(argument)?.encode(value)
    }

    pub fn encode_with(
        &self,
        argument: &AbiArgument,
        value: &AbiValue,
        options: EncodingOptions,
    ) -> AbiResult<Vec<u8>> {
        self.coder_with(argument, options)?.encode(value)
    }

    /// Decode one value of `argument` from `bytes` at `offset`.
    ///
    /// Rejects inputs longer than the configured `max_bytes`.
    pub fn decode(
        &self,
        argument: &AbiArgument,
        bytes: &[u8],
        offset: usize,
    ) -> AbiResult<(AbiValue, usize)> {
        self.decode_with(argument, bytes, offset, self.default_options()?)
    }

    pub fn decode_with(
        &self,
        argument: &AbiArgument,
        bytes: &[u8],
        offset: usize,
        options: EncodingOptions,
    ) -> AbiResult<(AbiValue, usize)> {
        check_input_size(bytes, self.config.max_bytes)?;
        log::trace!(
            "[abi] decode type {} at offset {} ({} bytes)",
            argument.type_id,
            offset,
            bytes.len()
        );
        self.coder_with(argument, options)?.decode(bytes, offset)
    }

    /// Encode a non-generic type looked up by its type string, e.g.
    /// `struct Point`.
    pub fn encode_named(&self, type_name: &str, value: &AbiValue) -> AbiResult<Vec<u8>> {
        let argument = self.named_argument(type_name)?;
        self.encode(&argument, value)
    }

    /// Decode a non-generic type looked up by its type string.
    pub fn decode_named(
        &self,
        type_name: &str,
        bytes: &[u8],
        offset: usize,
    ) -> AbiResult<(AbiValue, usize)> {
        let argument = self.named_argument(type_name)?;
        self.decode(&argument, bytes, offset)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn named_argument(&self, type_name: &str) -> AbiResult<AbiArgument> {
        self.abi
            .lookup_named_type(type_name)
            .map(|decl| AbiArgument::new(decl.type_id))
            .ok_or_else(|| {
                AbiError::TypeNotFound(format!(
                    "Type '{type_name}' does not exist in the provided abi."
                ))
            })
    }
}
