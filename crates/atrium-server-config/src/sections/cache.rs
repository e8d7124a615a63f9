// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Derived view cache configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 1000;

#[derive(Debug, Clone)]
pub struct CacheConfig {
	pub ttl_secs: u64,
	pub max_entries: u64,
	/// Discard view stores that raced with an invalidation.
	pub fence_writes: bool,
}

impl CacheConfig {
	pub fn ttl(&self) -> Duration {
		Duration::from_secs(self.ttl_secs)
	}
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self {
			ttl_secs: DEFAULT_CACHE_TTL_SECS,
			max_entries: DEFAULT_CACHE_MAX_ENTRIES,
			fence_writes: false,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfigLayer {
	#[serde(default)]
	pub ttl_secs: Option<u64>,
	#[serde(default)]
	pub max_entries: Option<u64>,
	#[serde(default)]
	pub fence_writes: Option<bool>,
}

impl CacheConfigLayer {
	pub fn merge(&mut self, other: CacheConfigLayer) {
		if other.ttl_secs.is_some() {
			self.ttl_secs = other.ttl_secs;
		}
		if other.max_entries.is_some() {
			self.max_entries = other.max_entries;
		}
		if other.fence_writes.is_some() {
			self.fence_writes = other.fence_writes;
		}
	}

	pub fn finalize(self) -> Result<CacheConfig, ConfigError> {
		let config = CacheConfig {
			ttl_secs: self.ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS),
			max_entries: self.max_entries.unwrap_or(DEFAULT_CACHE_MAX_ENTRIES),
			fence_writes: self.fence_writes.unwrap_or(false),
		};

		if config.ttl_secs == 0 {
			return Err(ConfigError::Validation(
				"cache.ttl_secs must be greater than zero".to_string(),
			));
		}
		if config.max_entries == 0 {
			return Err(ConfigError::Validation(
				"cache.max_entries must be greater than zero".to_string(),
			));
		}

		Ok(config)
	}
}
