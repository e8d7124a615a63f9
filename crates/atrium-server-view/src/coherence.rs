// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cache coherence for derived company views.
//!
//! Writers follow write-then-invalidate: persist the change, then call
//! [`CacheCoherenceManager::invalidate`] before reporting success. Readers go
//! through [`CacheCoherenceManager::view_or_build`], which rebuilds on a miss
//! and stores the result.
//!
//! Cache failures never surface to callers. A failed invalidation leaves a
//! stale view that expires with the cache TTL; a failed lookup is a miss.
//!
//! # Write fencing
//!
//! A reader that misses, builds, and stores can race a writer: the build may
//! observe data from before the write while the store lands after the
//! writer's invalidation. Each company therefore carries a generation counter
//! bumped by every invalidation. Readers snapshot it before building. With
//! fencing enabled, a store whose snapshot is older than the current
//! generation is dropped.

use atrium_server_auth::types::CompanyId;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::instrument;

use crate::builder::DerivedViewBuilder;
use crate::cache::{ViewCache, DEFAULT_TTL};
use crate::error::ViewError;
use crate::view::DerivedView;

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
	pub hits: u64,
	pub misses: u64,
	pub invalidations: u64,
	pub fenced_stores: u64,
}

/// Cache key for a company's view.
pub fn key_of(company_id: &CompanyId) -> String {
	format!("company-view:{company_id}")
}

pub struct CacheCoherenceManager {
	cache: Arc<dyn ViewCache>,
	ttl: Duration,
	fence_writes: bool,
	generations: Mutex<HashMap<CompanyId, u64>>,
	hits: AtomicU64,
	misses: AtomicU64,
	invalidations: AtomicU64,
	fenced_stores: AtomicU64,
}

impl CacheCoherenceManager {
	pub fn new(cache: Arc<dyn ViewCache>) -> Self {
		Self {
			cache,
			ttl: DEFAULT_TTL,
			fence_writes: false,
			generations: Mutex::new(HashMap::new()),
			hits: AtomicU64::new(0),
			misses: AtomicU64::new(0),
			invalidations: AtomicU64::new(0),
			fenced_stores: AtomicU64::new(0),
		}
	}

	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = ttl;
		self
	}

	pub fn with_fencing(mut self, fence_writes: bool) -> Self {
		self.fence_writes = fence_writes;
		self
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Drops any cached view for `company_id`. Idempotent; never fails.
	#[instrument(skip(self), fields(company_id = %company_id))]
	pub async fn invalidate(&self, company_id: &CompanyId) {
		self.bump_generation(company_id);
		self.invalidations.fetch_add(1, Ordering::Relaxed);

		if let Err(e) = self.cache.delete(&key_of(company_id)).await {
			tracing::warn!(company_id = %company_id, error = %e, "view invalidation failed; entry will expire with TTL");
		}
	}

	/// Invalidates the view of a deleted company and drops its generation.
	///
	/// Generations are otherwise kept for every company ever invalidated, so
	/// the map stays bounded by the number of live companies. A build that
	/// straddles the delete may still store a view; it is unreachable because
	/// reads check the company first, and it expires with the TTL.
	#[instrument(skip(self), fields(company_id = %company_id))]
	pub async fn forget(&self, company_id: &CompanyId) {
		{
			let mut generations = self.generations.lock().unwrap_or_else(|e| e.into_inner());
			generations.remove(company_id);
		}
		self.invalidations.fetch_add(1, Ordering::Relaxed);

		if let Err(e) = self.cache.delete(&key_of(company_id)).await {
			tracing::warn!(company_id = %company_id, error = %e, "view invalidation failed; entry will expire with TTL");
		}
	}

	/// Number of companies with a tracked generation.
	pub fn tracked_generations(&self) -> usize {
		self.generations.lock().unwrap_or_else(|e| e.into_inner()).len()
	}

	/// Current generation for `company_id`. Read before building a view.
	pub fn generation(&self, company_id: &CompanyId) -> u64 {
		let generations = self.generations.lock().unwrap_or_else(|e| e.into_inner());
		generations.get(company_id).copied().unwrap_or(0)
	}

	/// Cached view for `company_id`, if any. Read failures count as a miss.
	#[instrument(skip(self), fields(company_id = %company_id))]
	pub async fn lookup(&self, company_id: &CompanyId) -> Option<DerivedView> {
		let found = match self.cache.get(&key_of(company_id)).await {
			Ok(found) => found,
			Err(e) => {
				tracing::warn!(company_id = %company_id, error = %e, "view cache read failed; treating as miss");
				None
			}
		};

		if found.is_some() {
			self.hits.fetch_add(1, Ordering::Relaxed);
		} else {
			self.misses.fetch_add(1, Ordering::Relaxed);
		}
		found
	}

	/// Stores a freshly built view.
	///
	/// `observed_generation` is the value of [`generation`](Self::generation)
	/// taken before the build started. Returns `false` when the store was
	/// skipped by the fence or failed.
	#[instrument(skip(self, view), fields(company_id = %company_id))]
	pub async fn store(&self, company_id: &CompanyId, view: DerivedView, observed_generation: u64) -> bool {
		if self.fence_writes && observed_generation < self.generation(company_id) {
			self.fenced_stores.fetch_add(1, Ordering::Relaxed);
			tracing::debug!(company_id = %company_id, observed_generation, "discarding view built before invalidation");
			return false;
		}

		match self.cache.set(&key_of(company_id), view, self.ttl).await {
			Ok(()) => true,
			Err(e) => {
				tracing::warn!(company_id = %company_id, error = %e, "view cache write failed");
				false
			}
		}
	}

	/// Returns the cached view, building and storing it on a miss.
	pub async fn view_or_build(
		&self,
		company_id: &CompanyId,
		builder: &DerivedViewBuilder,
	) -> Result<DerivedView, ViewError> {
		if let Some(view) = self.lookup(company_id).await {
			return Ok(view);
		}

		let observed = self.generation(company_id);
		let view = builder.build(company_id).await?;
		self.store(company_id, view.clone(), observed).await;
		Ok(view)
	}

	pub fn stats(&self) -> CacheStats {
		CacheStats {
			hits: self.hits.load(Ordering::Relaxed),
			misses: self.misses.load(Ordering::Relaxed),
			invalidations: self.invalidations.load(Ordering::Relaxed),
			fenced_stores: self.fenced_stores.load(Ordering::Relaxed),
		}
	}

	fn bump_generation(&self, company_id: &CompanyId) {
		let mut generations = self.generations.lock().unwrap_or_else(|e| e.into_inner());
		*generations.entry(*company_id).or_insert(0) += 1;
	}
}
