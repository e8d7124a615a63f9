// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Company repository for database operations.
//!
//! This module provides database access for company management including:
//! - Company CRUD operations
//! - Membership management (add-if-absent and remove)
//! - Listing filtered by a [`ListingScope`]
//!
//! A loaded [`Company`] is hydrated with its member set and its resource id
//! index; both live in side tables.

use async_trait::async_trait;
use atrium_server_auth::{
	abac::ListingScope,
	company::Company,
	types::{CompanyId, UserId},
};
use chrono::Utc;
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;
use crate::rows::{decode_id, decode_ts, encode_ts};
use crate::types::ResourceKind;

#[async_trait]
pub trait CompanyStore: Send + Sync {
	async fn create_company(&self, company: &Company) -> Result<(), DbError>;
	async fn get_company(&self, id: &CompanyId) -> Result<Option<Company>, DbError>;
	async fn list_companies(&self, scope: ListingScope) -> Result<Vec<Company>, DbError>;
	async fn update_company(&self, company: &Company) -> Result<bool, DbError>;
	async fn delete_company(&self, id: &CompanyId) -> Result<bool, DbError>;
	async fn add_member(&self, id: &CompanyId, user_id: &UserId) -> Result<bool, DbError>;
	async fn remove_member(&self, id: &CompanyId, user_id: &UserId) -> Result<bool, DbError>;
}

/// Repository for company database operations.
///
/// All IDs are UUIDs stored as strings in SQLite.
#[derive(Clone)]
pub struct CompanyRepository {
	pool: SqlitePool,
}

impl CompanyRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Create a new company.
	///
	/// Members listed on `company` are inserted alongside it. The resource
	/// index is ignored; it is maintained by the catalog repository.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if a company with the same name exists.
	#[tracing::instrument(skip(self, company), fields(company_id = %company.id, owner_id = %company.owner_id))]
	pub async fn create_company(&self, company: &Company) -> Result<(), DbError> {
		let mut tx = self.pool.begin().await?;

		sqlx::query(
			r#"
			INSERT INTO companies (id, name, website_url, phone_number, owner_id, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(company.id.to_string())
		.bind(&company.name)
		.bind(&company.website_url)
		.bind(&company.phone_number)
		.bind(company.owner_id.to_string())
		.bind(encode_ts(&company.created_at))
		.bind(encode_ts(&company.updated_at))
		.execute(&mut *tx)
		.await
		.map_err(|e| DbError::from_constraint(e, format!("company name {:?} already exists", company.name)))?;

		let added_at = encode_ts(&company.created_at);
		for member in company.members.iter().filter(|m| **m != company.owner_id) {
			sqlx::query(
				"INSERT OR IGNORE INTO company_members (company_id, user_id, added_at) VALUES (?, ?, ?)",
			)
			.bind(company.id.to_string())
			.bind(member.to_string())
			.bind(&added_at)
			.execute(&mut *tx)
			.await?;
		}

		tx.commit().await?;

		tracing::debug!(company_id = %company.id, "company created");
		Ok(())
	}

	/// Get a company by ID, hydrated with members and resource index.
	///
	/// # Returns
	/// `None` if no company exists with this ID.
	#[tracing::instrument(skip(self), fields(company_id = %id))]
	pub async fn get_company(&self, id: &CompanyId) -> Result<Option<Company>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, name, website_url, phone_number, owner_id, created_at, updated_at
			FROM companies
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		match row {
			Some(row) => {
				let company = self.row_to_company(&row)?;
				Ok(Some(self.hydrate(company).await?))
			}
			None => Ok(None),
		}
	}

	/// List the companies visible under `scope`, oldest first.
	#[tracing::instrument(skip(self))]
	pub async fn list_companies(&self, scope: ListingScope) -> Result<Vec<Company>, DbError> {
		let rows = match scope {
			ListingScope::All => {
				sqlx::query(
					r#"
					SELECT id, name, website_url, phone_number, owner_id, created_at, updated_at
					FROM companies
					ORDER BY created_at, rowid
					"#,
				)
				.fetch_all(&self.pool)
				.await?
			}
			ListingScope::OwnedBy(user_id) => {
				sqlx::query(
					r#"
					SELECT id, name, website_url, phone_number, owner_id, created_at, updated_at
					FROM companies
					WHERE owner_id = ?
					ORDER BY created_at, rowid
					"#,
				)
				.bind(user_id.to_string())
				.fetch_all(&self.pool)
				.await?
			}
			ListingScope::OwnedOrMemberOf(user_id) => {
				sqlx::query(
					r#"
					SELECT id, name, website_url, phone_number, owner_id, created_at, updated_at
					FROM companies
					WHERE owner_id = ?
					   OR id IN (SELECT company_id FROM company_members WHERE user_id = ?)
					ORDER BY created_at, rowid
					"#,
				)
				.bind(user_id.to_string())
				.bind(user_id.to_string())
				.fetch_all(&self.pool)
				.await?
			}
		};

		let mut companies = Vec::with_capacity(rows.len());
		for row in &rows {
			let company = self.row_to_company(row)?;
			companies.push(self.hydrate(company).await?);
		}

		tracing::debug!(count = companies.len(), "companies listed");
		Ok(companies)
	}

	/// Update a company's scalar fields. Owner, members and index are not
	/// touched.
	///
	/// # Returns
	/// `false` if no company exists with this ID.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if the new name is taken.
	#[tracing::instrument(skip(self, company), fields(company_id = %company.id))]
	pub async fn update_company(&self, company: &Company) -> Result<bool, DbError> {
		let result = sqlx::query(
			r#"
			UPDATE companies
			SET name = ?, website_url = ?, phone_number = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&company.name)
		.bind(&company.website_url)
		.bind(&company.phone_number)
		.bind(encode_ts(&company.updated_at))
		.bind(company.id.to_string())
		.execute(&self.pool)
		.await
		.map_err(|e| DbError::from_constraint(e, format!("company name {:?} already exists", company.name)))?;

		Ok(result.rows_affected() > 0)
	}

	/// Delete a company together with its scoped resources, memberships and
	/// resource index.
	///
	/// # Returns
	/// `false` if no company exists with this ID.
	#[tracing::instrument(skip(self), fields(company_id = %id))]
	pub async fn delete_company(&self, id: &CompanyId) -> Result<bool, DbError> {
		let id_str = id.to_string();
		let mut tx = self.pool.begin().await?;

		for statement in [
			"DELETE FROM products WHERE company_id = ?",
			"DELETE FROM projects WHERE company_id = ?",
			"DELETE FROM offers WHERE company_id = ?",
			"DELETE FROM company_resources WHERE company_id = ?",
			"DELETE FROM company_members WHERE company_id = ?",
		] {
			sqlx::query(statement).bind(&id_str).execute(&mut *tx).await?;
		}

		let result = sqlx::query("DELETE FROM companies WHERE id = ?")
			.bind(&id_str)
			.execute(&mut *tx)
			.await?;

		tx.commit().await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!(company_id = %id, "company deleted");
		}
		Ok(deleted)
	}

	/// Add a member if not already present.
	///
	/// # Returns
	/// `true` if the user was newly added, `false` if already a member.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the company does not exist.
	#[tracing::instrument(skip(self), fields(company_id = %id, user_id = %user_id))]
	pub async fn add_member(&self, id: &CompanyId, user_id: &UserId) -> Result<bool, DbError> {
		let now = encode_ts(&Utc::now());
		let mut tx = self.pool.begin().await?;

		let result = sqlx::query(
			"INSERT OR IGNORE INTO company_members (company_id, user_id, added_at) VALUES (?, ?, ?)",
		)
		.bind(id.to_string())
		.bind(user_id.to_string())
		.bind(&now)
		.execute(&mut *tx)
		.await
		.map_err(|e| DbError::from_constraint(e, format!("company {id}")))?;

		let added = result.rows_affected() > 0;
		if added {
			sqlx::query("UPDATE companies SET updated_at = ? WHERE id = ?")
				.bind(&now)
				.bind(id.to_string())
				.execute(&mut *tx)
				.await?;
		}

		tx.commit().await?;
		Ok(added)
	}

	/// Remove a member.
	///
	/// # Returns
	/// `true` if the user was a member and has been removed.
	#[tracing::instrument(skip(self), fields(company_id = %id, user_id = %user_id))]
	pub async fn remove_member(&self, id: &CompanyId, user_id: &UserId) -> Result<bool, DbError> {
		let mut tx = self.pool.begin().await?;

		let result = sqlx::query("DELETE FROM company_members WHERE company_id = ? AND user_id = ?")
			.bind(id.to_string())
			.bind(user_id.to_string())
			.execute(&mut *tx)
			.await?;

		let removed = result.rows_affected() > 0;
		if removed {
			sqlx::query("UPDATE companies SET updated_at = ? WHERE id = ?")
				.bind(encode_ts(&Utc::now()))
				.bind(id.to_string())
				.execute(&mut *tx)
				.await?;
		}

		tx.commit().await?;
		Ok(removed)
	}

	async fn hydrate(&self, mut company: Company) -> Result<Company, DbError> {
		let id_str = company.id.to_string();

		let members = sqlx::query(
			"SELECT user_id FROM company_members WHERE company_id = ? ORDER BY added_at, rowid",
		)
		.bind(&id_str)
		.fetch_all(&self.pool)
		.await?;
		company.members = members
			.iter()
			.map(|r| decode_id::<UserId>(&r.get::<String, _>("user_id")))
			.collect::<Result<_, _>>()?;

		let index = sqlx::query(
			"SELECT kind, resource_id FROM company_resources WHERE company_id = ? ORDER BY position",
		)
		.bind(&id_str)
		.fetch_all(&self.pool)
		.await?;
		for row in &index {
			let kind: String = row.get("kind");
			let resource_id: String = row.get("resource_id");
			match kind.parse::<ResourceKind>().map_err(DbError::Internal)? {
				ResourceKind::Product => company.product_ids.push(decode_id(&resource_id)?),
				ResourceKind::Project => company.project_ids.push(decode_id(&resource_id)?),
				ResourceKind::Offer => company.offer_ids.push(decode_id(&resource_id)?),
			}
		}

		Ok(company)
	}

	fn row_to_company(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Company, DbError> {
		let id: String = row.get("id");
		let owner_id: String = row.get("owner_id");
		let created_at: String = row.get("created_at");
		let updated_at: String = row.get("updated_at");

		Ok(Company {
			id: decode_id(&id)?,
			name: row.get("name"),
			website_url: row.get("website_url"),
			phone_number: row.get("phone_number"),
			owner_id: decode_id(&owner_id)?,
			members: Vec::new(),
			product_ids: Vec::new(),
			project_ids: Vec::new(),
			offer_ids: Vec::new(),
			created_at: decode_ts(&created_at, "created_at")?,
			updated_at: decode_ts(&updated_at, "updated_at")?,
		})
	}
}

#[async_trait]
impl CompanyStore for CompanyRepository {
	async fn create_company(&self, company: &Company) -> Result<(), DbError> {
		self.create_company(company).await
	}

	async fn get_company(&self, id: &CompanyId) -> Result<Option<Company>, DbError> {
		self.get_company(id).await
	}

	async fn list_companies(&self, scope: ListingScope) -> Result<Vec<Company>, DbError> {
		self.list_companies(scope).await
	}

	async fn update_company(&self, company: &Company) -> Result<bool, DbError> {
		self.update_company(company).await
	}

	async fn delete_company(&self, id: &CompanyId) -> Result<bool, DbError> {
		self.delete_company(id).await
	}

	async fn add_member(&self, id: &CompanyId, user_id: &UserId) -> Result<bool, DbError> {
		self.add_member(id, user_id).await
	}

	async fn remove_member(&self, id: &CompanyId, user_id: &UserId) -> Result<bool, DbError> {
		self.remove_member(id, user_id).await
	}
}
