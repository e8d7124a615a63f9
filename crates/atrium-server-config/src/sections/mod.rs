// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections. Each section has a resolved `*Config` and a
//! partial `*ConfigLayer` that merges field by field.

mod access;
mod auth;
mod cache;
mod database;
mod http;
mod logging;

pub use access::{AccessConfig, AccessConfigLayer};
pub use auth::{AuthConfig, AuthConfigLayer, TokenGrant, TokenGrantLayer};
pub use cache::{CacheConfig, CacheConfigLayer, DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL_SECS};
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
