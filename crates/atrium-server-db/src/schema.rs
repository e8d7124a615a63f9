// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Schema creation. Every statement is idempotent, so running the migrations
//! against an existing database is a no-op.

use sqlx::sqlite::SqlitePool;

use crate::error::DbError;

const MIGRATIONS: &[&str] = &[
	r#"
	CREATE TABLE IF NOT EXISTS companies (
		id TEXT PRIMARY KEY NOT NULL,
		name TEXT NOT NULL UNIQUE,
		website_url TEXT,
		phone_number TEXT,
		owner_id TEXT NOT NULL,
		created_at TEXT NOT NULL,
		updated_at TEXT NOT NULL
	)
	"#,
	"CREATE INDEX IF NOT EXISTS idx_companies_owner ON companies(owner_id)",
	r#"
	CREATE TABLE IF NOT EXISTS company_members (
		company_id TEXT NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
		user_id TEXT NOT NULL,
		added_at TEXT NOT NULL,
		PRIMARY KEY (company_id, user_id)
	)
	"#,
	"CREATE INDEX IF NOT EXISTS idx_company_members_user ON company_members(user_id)",
	r#"
	CREATE TABLE IF NOT EXISTS company_resources (
		position INTEGER PRIMARY KEY AUTOINCREMENT,
		company_id TEXT NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
		kind TEXT NOT NULL CHECK (kind IN ('product', 'project', 'offer')),
		resource_id TEXT NOT NULL,
		UNIQUE (company_id, kind, resource_id)
	)
	"#,
	r#"
	CREATE TABLE IF NOT EXISTS products (
		id TEXT PRIMARY KEY NOT NULL,
		company_id TEXT NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
		name TEXT NOT NULL,
		description TEXT NOT NULL,
		price REAL NOT NULL,
		category TEXT,
		created_at TEXT NOT NULL,
		updated_at TEXT NOT NULL
	)
	"#,
	"CREATE INDEX IF NOT EXISTS idx_products_company ON products(company_id, created_at)",
	r#"
	CREATE TABLE IF NOT EXISTS projects (
		id TEXT PRIMARY KEY NOT NULL,
		company_id TEXT NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
		name TEXT NOT NULL,
		description TEXT NOT NULL,
		status TEXT,
		url TEXT,
		created_at TEXT NOT NULL,
		updated_at TEXT NOT NULL
	)
	"#,
	"CREATE INDEX IF NOT EXISTS idx_projects_company ON projects(company_id, created_at)",
	r#"
	CREATE TABLE IF NOT EXISTS offers (
		id TEXT PRIMARY KEY NOT NULL,
		company_id TEXT NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
		title TEXT NOT NULL,
		description TEXT NOT NULL,
		discount REAL NOT NULL,
		valid_until TEXT,
		created_at TEXT NOT NULL,
		updated_at TEXT NOT NULL
	)
	"#,
	"CREATE INDEX IF NOT EXISTS idx_offers_company ON offers(company_id, created_at)",
];

/// Create all tables and indexes.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
	for statement in MIGRATIONS {
		sqlx::query(statement).execute(pool).await?;
	}
	tracing::debug!(statements = MIGRATIONS.len(), "migrations applied");
	Ok(())
}
