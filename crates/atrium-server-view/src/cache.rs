// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Backing store for derived views.
//!
//! [`MokaViewCache`] is the in-process implementation: a bounded moka cache
//! (TinyLFU admission, size-bounded eviction) where every entry expires after
//! the TTL it was written with.

use async_trait::async_trait;
use moka::sync::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};

use crate::error::CacheError;
use crate::view::DerivedView;

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default maximum number of cached views.
pub const DEFAULT_MAX_ENTRIES: u64 = 1_000;

/// Key/value store for derived views.
#[async_trait]
pub trait ViewCache: Send + Sync {
	async fn get(&self, key: &str) -> Result<Option<DerivedView>, CacheError>;
	async fn set(&self, key: &str, view: DerivedView, ttl: Duration) -> Result<(), CacheError>;
	async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

#[derive(Clone)]
struct Entry {
	view: DerivedView,
	ttl: Duration,
}

struct EntryTtl;

impl Expiry<String, Entry> for EntryTtl {
	fn expire_after_create(&self, _key: &String, value: &Entry, _created_at: Instant) -> Option<Duration> {
		Some(value.ttl)
	}

	fn expire_after_update(
		&self,
		_key: &String,
		value: &Entry,
		_updated_at: Instant,
		_duration_until_expiry: Option<Duration>,
	) -> Option<Duration> {
		Some(value.ttl)
	}
}

/// In-process view cache.
pub struct MokaViewCache {
	cache: Cache<String, Entry>,
}

impl MokaViewCache {
	/// Create a cache holding at most `max_entries` views.
	pub fn new(max_entries: u64) -> Self {
		let cache = Cache::builder()
			.max_capacity(max_entries)
			.expire_after(EntryTtl)
			.build();
		Self { cache }
	}

	/// Number of entries currently in the cache. May lag behind recent writes.
	pub fn len(&self) -> u64 {
		self.cache.entry_count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Default for MokaViewCache {
	fn default() -> Self {
		Self::new(DEFAULT_MAX_ENTRIES)
	}
}

#[async_trait]
impl ViewCache for MokaViewCache {
	async fn get(&self, key: &str) -> Result<Option<DerivedView>, CacheError> {
		Ok(self.cache.get(key).map(|entry| entry.view))
	}

	async fn set(&self, key: &str, view: DerivedView, ttl: Duration) -> Result<(), CacheError> {
		self.cache.insert(key.to_string(), Entry { view, ttl });
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<(), CacheError> {
		self.cache.invalidate(key);
		Ok(())
	}
}
