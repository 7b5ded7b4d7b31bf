// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent LRU cache of built coder trees.
//!
//! Building a coder walks the schema and allocates the whole tree, so an
//! [`AbiCoder`](crate::AbiCoder) that encodes the same argument repeatedly
//! keeps the trees here, keyed by `(argument, options)`. Reads only take the
//! shared lock; the exclusive lock is held while inserting.

use crate::abi::AbiArgument;
use crate::coders::Coder;
use crate::config::EncodingOptions;
use crate::error::AbiResult;
use lru::LruCache;
use parking_lot::RwLock;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

/// Identifies one coder tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CoderKey {
    argument: AbiArgument,
    options: EncodingOptions,
}

impl CoderKey {
    pub fn new(argument: &AbiArgument, options: EncodingOptions) -> Self {
        Self {
            argument: argument.clone(),
            options,
        }
    }
}

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Build time of the most recent miss.
    pub last_build_ns: u64,
}

/// LRU cache of `Arc<dyn Coder>`; capacity 0 disables caching.
pub struct CoderCache {
    inner: Option<RwLock<LruCache<CoderKey, Arc<dyn Coder>>>>,
    stats: RwLock<CacheStats>,
}

impl CoderCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: NonZeroUsize::new(capacity).map(|cap| RwLock::new(LruCache::new(cap))),
            stats: RwLock::new(CacheStats::default()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |c| c.read().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached tree for `key`, building and inserting it on a miss.
    ///
    /// Build errors are returned as-is and nothing is cached.
    pub fn get_or_try_build<F>(&self, key: CoderKey, build: F) -> AbiResult<Arc<dyn Coder>>
    where
        F: FnOnce() -> AbiResult<Box<dyn Coder>>,
    {
        let Some(inner) = &self.inner else {
            let start = Instant::now();
            let built: Arc<dyn Coder> = Arc::from(build()?);
            self.record_miss(start, false);
            return Ok(built);
        };

        let cached = inner.read().peek(&key).map(Arc::clone);
        if let Some(hit) = cached {
            self.record_hit();
            log::trace!("[abi] coder cache hit: type {}", key.argument.type_id);
            return Ok(hit);
        }

        let mut cache = inner.write();
        if let Some(hit) = cache.get(&key) {
            self.record_hit();
            return Ok(Arc::clone(hit));
        }

        let start = Instant::now();
        let built: Arc<dyn Coder> = Arc::from(build()?);
        let type_id = key.argument.type_id;
        let evicted = cache.push(key, Arc::clone(&built)).is_some();
        self.record_miss(start, evicted);
        log::debug!(
            "[abi] coder cache miss: type {} ({} cached{})",
            type_id,
            cache.len(),
            if evicted { ", evicted lru" } else { "" }
        );
        Ok(built)
    }

    pub fn clear(&self) {
        if let Some(inner) = &self.inner {
            inner.write().clear();
        }
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        *self.stats.read()
    }

    fn record_hit(&self) {
        let mut stats = self.stats.write();
        stats.hits = stats.hits.saturating_add(1);
    }

    fn record_miss(&self, start: Instant, evicted: bool) {
        let mut stats = self.stats.write();
        stats.misses = stats.misses.saturating_add(1);
        if evicted {
            stats.evictions = stats.evictions.saturating_add(1);
        }
        stats.last_build_ns = start.elapsed().as_nanos() as u64;
    }
}

impl std::fmt::Debug for CoderCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoderCache")
            .field("enabled", &self.is_enabled())
            .field("len", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}
