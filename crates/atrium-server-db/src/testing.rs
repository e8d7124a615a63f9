// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::schema::run_migrations;

/// An in-memory pool with no tables.
///
/// Pinned to a single long-lived connection: every new connection to
/// `:memory:` opens a fresh, empty database.
pub async fn create_empty_test_pool() -> SqlitePool {
	let options = SqliteConnectOptions::from_str(":memory:")
		.unwrap()
		.foreign_keys(true)
		.create_if_missing(true);

	SqlitePoolOptions::new()
		.max_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect_with(options)
		.await
		.expect("Failed to create test pool")
}

/// An in-memory pool with the full schema applied.
pub async fn create_test_pool() -> SqlitePool {
	let pool = create_empty_test_pool().await;
	run_migrations(&pool).await.unwrap();
	pool
}
