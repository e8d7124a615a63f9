// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Catalog repository: products, projects and offers.
//!
//! Each create or delete writes the resource row and the owning company's
//! resource index in one transaction. Lists are ordered newest first.

use async_trait::async_trait;
use atrium_server_auth::types::{CompanyId, OfferId, ProductId, ProjectId};
use sqlx::{sqlite::SqlitePool, Row, SqliteConnection};

use crate::error::DbError;
use crate::rows::{decode_id, decode_opt_ts, decode_ts, encode_ts};
use crate::types::{Offer, Product, Project, ResourceKind};

#[async_trait]
pub trait CatalogStore: Send + Sync {
	async fn create_product(&self, product: &Product) -> Result<(), DbError>;
	async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, DbError>;
	async fn list_products(&self, company_id: &CompanyId) -> Result<Vec<Product>, DbError>;
	async fn update_product(&self, product: &Product) -> Result<bool, DbError>;
	async fn delete_product(&self, company_id: &CompanyId, id: &ProductId) -> Result<bool, DbError>;

	async fn create_project(&self, project: &Project) -> Result<(), DbError>;
	async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, DbError>;
	async fn list_projects(&self, company_id: &CompanyId) -> Result<Vec<Project>, DbError>;
	async fn update_project(&self, project: &Project) -> Result<bool, DbError>;
	async fn delete_project(&self, company_id: &CompanyId, id: &ProjectId) -> Result<bool, DbError>;

	async fn create_offer(&self, offer: &Offer) -> Result<(), DbError>;
	async fn get_offer(&self, id: &OfferId) -> Result<Option<Offer>, DbError>;
	async fn list_offers(&self, company_id: &CompanyId) -> Result<Vec<Offer>, DbError>;
	async fn update_offer(&self, offer: &Offer) -> Result<bool, DbError>;
	async fn delete_offer(&self, company_id: &CompanyId, id: &OfferId) -> Result<bool, DbError>;
}

/// Repository for company-scoped catalog records.
#[derive(Clone)]
pub struct CatalogRepository {
	pool: SqlitePool,
}

impl CatalogRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	// =========================================================================
	// Products
	// =========================================================================

	/// Create a product and append it to its company's index.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the company does not exist.
	#[tracing::instrument(skip(self, product), fields(company_id = %product.company_id, product_id = %product.id))]
	pub async fn create_product(&self, product: &Product) -> Result<(), DbError> {
		let mut tx = self.pool.begin().await?;

		sqlx::query(
			r#"
			INSERT INTO products (id, company_id, name, description, price, category, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(product.id.to_string())
		.bind(product.company_id.to_string())
		.bind(&product.name)
		.bind(&product.description)
		.bind(product.price)
		.bind(&product.category)
		.bind(encode_ts(&product.created_at))
		.bind(encode_ts(&product.updated_at))
		.execute(&mut *tx)
		.await
		.map_err(|e| DbError::from_constraint(e, format!("company {}", product.company_id)))?;

		index_add(&mut *tx, &product.company_id, ResourceKind::Product, &product.id.to_string()).await?;
		tx.commit().await?;

		tracing::debug!(product_id = %product.id, "product created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(product_id = %id))]
	pub async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, company_id, name, description, price, category, created_at, updated_at
			FROM products
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_product(&r)).transpose()
	}

	#[tracing::instrument(skip(self), fields(company_id = %company_id))]
	pub async fn list_products(&self, company_id: &CompanyId) -> Result<Vec<Product>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, company_id, name, description, price, category, created_at, updated_at
			FROM products
			WHERE company_id = ?
			ORDER BY created_at DESC, rowid DESC
			"#,
		)
		.bind(company_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_product).collect()
	}

	/// Update a product's mutable fields. `company_id` is never changed.
	#[tracing::instrument(skip(self, product), fields(product_id = %product.id))]
	pub async fn update_product(&self, product: &Product) -> Result<bool, DbError> {
		let result = sqlx::query(
			r#"
			UPDATE products
			SET name = ?, description = ?, price = ?, category = ?, updated_at = ?
			WHERE id = ? AND company_id = ?
			"#,
		)
		.bind(&product.name)
		.bind(&product.description)
		.bind(product.price)
		.bind(&product.category)
		.bind(encode_ts(&product.updated_at))
		.bind(product.id.to_string())
		.bind(product.company_id.to_string())
		.execute(&self.pool)
		.await?;

		Ok(result.rows_affected() > 0)
	}

	#[tracing::instrument(skip(self), fields(company_id = %company_id, product_id = %id))]
	pub async fn delete_product(&self, company_id: &CompanyId, id: &ProductId) -> Result<bool, DbError> {
		self.delete_resource("products", ResourceKind::Product, company_id, &id.to_string()).await
	}

	// =========================================================================
	// Projects
	// =========================================================================

	/// Create a project and append it to its company's index.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the company does not exist.
	#[tracing::instrument(skip(self, project), fields(company_id = %project.company_id, project_id = %project.id))]
	pub async fn create_project(&self, project: &Project) -> Result<(), DbError> {
		let mut tx = self.pool.begin().await?;

		sqlx::query(
			r#"
			INSERT INTO projects (id, company_id, name, description, status, url, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(project.id.to_string())
		.bind(project.company_id.to_string())
		.bind(&project.name)
		.bind(&project.description)
		.bind(&project.status)
		.bind(&project.url)
		.bind(encode_ts(&project.created_at))
		.bind(encode_ts(&project.updated_at))
		.execute(&mut *tx)
		.await
		.map_err(|e| DbError::from_constraint(e, format!("company {}", project.company_id)))?;

		index_add(&mut *tx, &project.company_id, ResourceKind::Project, &project.id.to_string()).await?;
		tx.commit().await?;

		tracing::debug!(project_id = %project.id, "project created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(project_id = %id))]
	pub async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, company_id, name, description, status, url, created_at, updated_at
			FROM projects
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_project(&r)).transpose()
	}

	#[tracing::instrument(skip(self), fields(company_id = %company_id))]
	pub async fn list_projects(&self, company_id: &CompanyId) -> Result<Vec<Project>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, company_id, name, description, status, url, created_at, updated_at
			FROM projects
			WHERE company_id = ?
			ORDER BY created_at DESC, rowid DESC
			"#,
		)
		.bind(company_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_project).collect()
	}

	#[tracing::instrument(skip(self, project), fields(project_id = %project.id))]
	pub async fn update_project(&self, project: &Project) -> Result<bool, DbError> {
		let result = sqlx::query(
			r#"
			UPDATE projects
			SET name = ?, description = ?, status = ?, url = ?, updated_at = ?
			WHERE id = ? AND company_id = ?
			"#,
		)
		.bind(&project.name)
		.bind(&project.description)
		.bind(&project.status)
		.bind(&project.url)
		.bind(encode_ts(&project.updated_at))
		.bind(project.id.to_string())
		.bind(project.company_id.to_string())
		.execute(&self.pool)
		.await?;

		Ok(result.rows_affected() > 0)
	}

	#[tracing::instrument(skip(self), fields(company_id = %company_id, project_id = %id))]
	pub async fn delete_project(&self, company_id: &CompanyId, id: &ProjectId) -> Result<bool, DbError> {
		self.delete_resource("projects", ResourceKind::Project, company_id, &id.to_string()).await
	}

	// =========================================================================
	// Offers
	// =========================================================================

	/// Create an offer and append it to its company's index.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the company does not exist.
	#[tracing::instrument(skip(self, offer), fields(company_id = %offer.company_id, offer_id = %offer.id))]
	pub async fn create_offer(&self, offer: &Offer) -> Result<(), DbError> {
		let mut tx = self.pool.begin().await?;

		sqlx::query(
			r#"
			INSERT INTO offers (id, company_id, title, description, discount, valid_until, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(offer.id.to_string())
		.bind(offer.company_id.to_string())
		.bind(&offer.title)
		.bind(&offer.description)
		.bind(offer.discount)
		.bind(offer.valid_until.as_ref().map(encode_ts))
		.bind(encode_ts(&offer.created_at))
		.bind(encode_ts(&offer.updated_at))
		.execute(&mut *tx)
		.await
		.map_err(|e| DbError::from_constraint(e, format!("company {}", offer.company_id)))?;

		index_add(&mut *tx, &offer.company_id, ResourceKind::Offer, &offer.id.to_string()).await?;
		tx.commit().await?;

		tracing::debug!(offer_id = %offer.id, "offer created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(offer_id = %id))]
	pub async fn get_offer(&self, id: &OfferId) -> Result<Option<Offer>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, company_id, title, description, discount, valid_until, created_at, updated_at
			FROM offers
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_offer(&r)).transpose()
	}

	#[tracing::instrument(skip(self), fields(company_id = %company_id))]
	pub async fn list_offers(&self, company_id: &CompanyId) -> Result<Vec<Offer>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, company_id, title, description, discount, valid_until, created_at, updated_at
			FROM offers
			WHERE company_id = ?
			ORDER BY created_at DESC, rowid DESC
			"#,
		)
		.bind(company_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_offer).collect()
	}

	#[tracing::instrument(skip(self, offer), fields(offer_id = %offer.id))]
	pub async fn update_offer(&self, offer: &Offer) -> Result<bool, DbError> {
		let result = sqlx::query(
			r#"
			UPDATE offers
			SET title = ?, description = ?, discount = ?, valid_until = ?, updated_at = ?
			WHERE id = ? AND company_id = ?
			"#,
		)
		.bind(&offer.title)
		.bind(&offer.description)
		.bind(offer.discount)
		.bind(offer.valid_until.as_ref().map(encode_ts))
		.bind(encode_ts(&offer.updated_at))
		.bind(offer.id.to_string())
		.bind(offer.company_id.to_string())
		.execute(&self.pool)
		.await?;

		Ok(result.rows_affected() > 0)
	}

	#[tracing::instrument(skip(self), fields(company_id = %company_id, offer_id = %id))]
	pub async fn delete_offer(&self, company_id: &CompanyId, id: &OfferId) -> Result<bool, DbError> {
		self.delete_resource("offers", ResourceKind::Offer, company_id, &id.to_string()).await
	}

	// =========================================================================
	// Shared
	// =========================================================================

	async fn delete_resource(
		&self,
		table: &'static str,
		kind: ResourceKind,
		company_id: &CompanyId,
		resource_id: &str,
	) -> Result<bool, DbError> {
		let mut tx = self.pool.begin().await?;

		let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = ? AND company_id = ?"))
			.bind(resource_id)
			.bind(company_id.to_string())
			.execute(&mut *tx)
			.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			index_remove(&mut *tx, company_id, kind, resource_id).await?;
		}

		tx.commit().await?;
		if deleted {
			tracing::debug!(%kind, resource_id, "resource deleted");
		}
		Ok(deleted)
	}
}

async fn index_add(
	conn: &mut SqliteConnection,
	company_id: &CompanyId,
	kind: ResourceKind,
	resource_id: &str,
) -> Result<(), DbError> {
	sqlx::query(
		"INSERT OR IGNORE INTO company_resources (company_id, kind, resource_id) VALUES (?, ?, ?)",
	)
	.bind(company_id.to_string())
	.bind(kind.as_str())
	.bind(resource_id)
	.execute(&mut *conn)
	.await?;
	Ok(())
}

async fn index_remove(
	conn: &mut SqliteConnection,
	company_id: &CompanyId,
	kind: ResourceKind,
	resource_id: &str,
) -> Result<(), DbError> {
	sqlx::query("DELETE FROM company_resources WHERE company_id = ? AND kind = ? AND resource_id = ?")
		.bind(company_id.to_string())
		.bind(kind.as_str())
		.bind(resource_id)
		.execute(&mut *conn)
		.await?;
	Ok(())
}

fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> Result<Product, DbError> {
	let id: String = row.get("id");
	let company_id: String = row.get("company_id");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(Product {
		id: decode_id(&id)?,
		company_id: decode_id(&company_id)?,
		name: row.get("name"),
		description: row.get("description"),
		price: row.get("price"),
		category: row.get("category"),
		created_at: decode_ts(&created_at, "created_at")?,
		updated_at: decode_ts(&updated_at, "updated_at")?,
	})
}

fn row_to_project(row: &sqlx::sqlite::SqliteRow) -> Result<Project, DbError> {
	let id: String = row.get("id");
	let company_id: String = row.get("company_id");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(Project {
		id: decode_id(&id)?,
		company_id: decode_id(&company_id)?,
		name: row.get("name"),
		description: row.get("description"),
		status: row.get("status"),
		url: row.get("url"),
		created_at: decode_ts(&created_at, "created_at")?,
		updated_at: decode_ts(&updated_at, "updated_at")?,
	})
}

fn row_to_offer(row: &sqlx::sqlite::SqliteRow) -> Result<Offer, DbError> {
	let id: String = row.get("id");
	let company_id: String = row.get("company_id");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(Offer {
		id: decode_id(&id)?,
		company_id: decode_id(&company_id)?,
		title: row.get("title"),
		description: row.get("description"),
		discount: row.get("discount"),
		valid_until: decode_opt_ts(row.get("valid_until"), "valid_until")?,
		created_at: decode_ts(&created_at, "created_at")?,
		updated_at: decode_ts(&updated_at, "updated_at")?,
	})
}

#[async_trait]
impl CatalogStore for CatalogRepository {
	async fn create_product(&self, product: &Product) -> Result<(), DbError> {
		self.create_product(product).await
	}

	async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, DbError> {
		self.get_product(id).await
	}

	async fn list_products(&self, company_id: &CompanyId) -> Result<Vec<Product>, DbError> {
		self.list_products(company_id).await
	}

	async fn update_product(&self, product: &Product) -> Result<bool, DbError> {
		self.update_product(product).await
	}

	async fn delete_product(&self, company_id: &CompanyId, id: &ProductId) -> Result<bool, DbError> {
		self.delete_product(company_id, id).await
	}

	async fn create_project(&self, project: &Project) -> Result<(), DbError> {
		self.create_project(project).await
	}

	async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, DbError> {
		self.get_project(id).await
	}

	async fn list_projects(&self, company_id: &CompanyId) -> Result<Vec<Project>, DbError> {
		self.list_projects(company_id).await
	}

	async fn update_project(&self, project: &Project) -> Result<bool, DbError> {
		self.update_project(project).await
	}

	async fn delete_project(&self, company_id: &CompanyId, id: &ProjectId) -> Result<bool, DbError> {
		self.delete_project(company_id, id).await
	}

	async fn create_offer(&self, offer: &Offer) -> Result<(), DbError> {
		self.create_offer(offer).await
	}

	async fn get_offer(&self, id: &OfferId) -> Result<Option<Offer>, DbError> {
		self.get_offer(id).await
	}

	async fn list_offers(&self, company_id: &CompanyId) -> Result<Vec<Offer>, DbError> {
		self.list_offers(company_id).await
	}

	async fn update_offer(&self, offer: &Offer) -> Result<bool, DbError> {
		self.update_offer(offer).await
	}

	async fn delete_offer(&self, company_id: &CompanyId, id: &OfferId) -> Result<bool, DbError> {
		self.delete_offer(company_id, id).await
	}
}
