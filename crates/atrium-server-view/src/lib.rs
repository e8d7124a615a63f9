// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Derived company views, their cache, and the coherence rules that keep the
//! cache in step with catalog writes.

pub mod builder;
pub mod cache;
pub mod coherence;
pub mod error;
pub mod view;

pub use builder::{compose_responses, DerivedViewBuilder};
pub use cache::{MokaViewCache, ViewCache, DEFAULT_MAX_ENTRIES, DEFAULT_TTL};
pub use coherence::{key_of, CacheCoherenceManager, CacheStats};
pub use error::{CacheError, Result, ViewError};
pub use view::{DerivedView, OfferSummary, ProductSummary, ProjectSummary, ViewVariables, VIEW_FORMAT_VERSION};
