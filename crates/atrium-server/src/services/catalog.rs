// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Products, projects and offers under a company.
//!
//! A resource is only visible through the company named by its own
//! `company_id`; a resource id paired with any other company is NotFound.

use std::sync::Arc;

use atrium_server_auth::{Action, CompanyId, OfferId, Principal, ProductId, ProjectId};
use atrium_server_db::{CatalogStore, CompanyStore, Offer, Product, Project, ResourceKind};
use atrium_server_view::CacheCoherenceManager;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use super::authorize;
use crate::error::ApiError;
use crate::validation::{
	decode_object, optional_text, parse_offer_id, parse_product_id, parse_project_id, require_text,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScopedResource {
	Product(Product),
	Project(Project),
	Offer(Offer),
}

/// A resource id already parsed for its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceId {
	Product(ProductId),
	Project(ProjectId),
	Offer(OfferId),
}

impl ResourceId {
	pub fn parse(kind: ResourceKind, raw: &str) -> Result<Self, ApiError> {
		Ok(match kind {
			ResourceKind::Product => ResourceId::Product(parse_product_id(raw)?),
			ResourceKind::Project => ResourceId::Project(parse_project_id(raw)?),
			ResourceKind::Offer => ResourceId::Offer(parse_offer_id(raw)?),
		})
	}

	fn not_found(&self) -> ApiError {
		match self {
			ResourceId::Product(id) => ApiError::NotFound(format!("Product not found: {id}")),
			ResourceId::Project(id) => ApiError::NotFound(format!("Project not found: {id}")),
			ResourceId::Offer(id) => ApiError::NotFound(format!("Offer not found: {id}")),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub description: String,
	pub price: f64,
	#[serde(default)]
	pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub price: Option<f64>,
	#[serde(default)]
	pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub status: Option<String>,
	#[serde(default)]
	pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectRequest {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub status: Option<String>,
	#[serde(default)]
	pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOfferRequest {
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub description: String,
	pub discount: f64,
	#[serde(default)]
	pub valid_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOfferRequest {
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub discount: Option<f64>,
	#[serde(default)]
	pub valid_until: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct CatalogService {
	companies: Arc<dyn CompanyStore>,
	catalog: Arc<dyn CatalogStore>,
	coherence: Arc<CacheCoherenceManager>,
}

impl CatalogService {
	pub fn new(
		companies: Arc<dyn CompanyStore>,
		catalog: Arc<dyn CatalogStore>,
		coherence: Arc<CacheCoherenceManager>,
	) -> Self {
		Self {
			companies,
			catalog,
			coherence,
		}
	}

	/// Resources of `kind`, newest first.
	#[instrument(skip(self, principal), fields(subject_id = %principal.subject_id, company_id = %company_id, %kind))]
	pub async fn list(
		&self,
		principal: &Principal,
		company_id: &CompanyId,
		kind: ResourceKind,
	) -> Result<Vec<ScopedResource>, ApiError> {
		authorize(self.companies.as_ref(), principal, company_id, Action::ReadScopedResource).await?;

		let items = match kind {
			ResourceKind::Product => self
				.catalog
				.list_products(company_id)
				.await?
				.into_iter()
				.map(ScopedResource::Product)
				.collect(),
			ResourceKind::Project => self
				.catalog
				.list_projects(company_id)
				.await?
				.into_iter()
				.map(ScopedResource::Project)
				.collect(),
			ResourceKind::Offer => self
				.catalog
				.list_offers(company_id)
				.await?
				.into_iter()
				.map(ScopedResource::Offer)
				.collect(),
		};
		Ok(items)
	}

	#[instrument(skip(self, principal, body), fields(subject_id = %principal.subject_id, company_id = %company_id, %kind))]
	pub async fn create(
		&self,
		principal: &Principal,
		company_id: &CompanyId,
		kind: ResourceKind,
		body: Value,
	) -> Result<ScopedResource, ApiError> {
		authorize(self.companies.as_ref(), principal, company_id, Action::CreateScopedResource).await?;

		let created = match kind {
			ResourceKind::Product => {
				let req: CreateProductRequest = decode_object(body)?;
				let mut product = Product::new(
					*company_id,
					require_text("name", &req.name)?,
					req.description,
					req.price,
				);
				product.category = req.category;
				self.catalog.create_product(&product).await?;
				ScopedResource::Product(product)
			}
			ResourceKind::Project => {
				let req: CreateProjectRequest = decode_object(body)?;
				let mut project = Project::new(*company_id, require_text("name", &req.name)?, req.description);
				project.status = req.status;
				project.url = req.url;
				self.catalog.create_project(&project).await?;
				ScopedResource::Project(project)
			}
			ResourceKind::Offer => {
				let req: CreateOfferRequest = decode_object(body)?;
				let mut offer = Offer::new(
					*company_id,
					require_text("title", &req.title)?,
					req.description,
					req.discount,
				);
				offer.valid_until = req.valid_until;
				self.catalog.create_offer(&offer).await?;
				ScopedResource::Offer(offer)
			}
		};

		self.coherence.invalidate(company_id).await;
		Ok(created)
	}

	pub async fn get(
		&self,
		principal: &Principal,
		company_id: &CompanyId,
		resource_id: ResourceId,
	) -> Result<ScopedResource, ApiError> {
		authorize(self.companies.as_ref(), principal, company_id, Action::ReadScopedResource).await?;
		self.load(company_id, resource_id).await
	}

	#[instrument(skip(self, principal, body), fields(subject_id = %principal.subject_id, company_id = %company_id))]
	pub async fn update(
		&self,
		principal: &Principal,
		company_id: &CompanyId,
		resource_id: ResourceId,
		body: Value,
	) -> Result<ScopedResource, ApiError> {
		authorize(self.companies.as_ref(), principal, company_id, Action::UpdateScopedResource).await?;

		let now = Utc::now();
		let updated = match self.load(company_id, resource_id).await? {
			ScopedResource::Product(mut product) => {
				let req: UpdateProductRequest = decode_object(body)?;
				if let Some(name) = optional_text("name", req.name)? {
					product.name = name;
				}
				if let Some(description) = req.description {
					product.description = description;
				}
				if let Some(price) = req.price {
					product.price = price;
				}
				if req.category.is_some() {
					product.category = req.category;
				}
				product.updated_at = now;
				self.catalog.update_product(&product).await?.then_some(ScopedResource::Product(product))
			}
			ScopedResource::Project(mut project) => {
				let req: UpdateProjectRequest = decode_object(body)?;
				if let Some(name) = optional_text("name", req.name)? {
					project.name = name;
				}
				if let Some(description) = req.description {
					project.description = description;
				}
				if req.status.is_some() {
					project.status = req.status;
				}
				if req.url.is_some() {
					project.url = req.url;
				}
				project.updated_at = now;
				self.catalog.update_project(&project).await?.then_some(ScopedResource::Project(project))
			}
			ScopedResource::Offer(mut offer) => {
				let req: UpdateOfferRequest = decode_object(body)?;
				if let Some(title) = optional_text("title", req.title)? {
					offer.title = title;
				}
				if let Some(description) = req.description {
					offer.description = description;
				}
				if let Some(discount) = req.discount {
					offer.discount = discount;
				}
				if req.valid_until.is_some() {
					offer.valid_until = req.valid_until;
				}
				offer.updated_at = now;
				self.catalog.update_offer(&offer).await?.then_some(ScopedResource::Offer(offer))
			}
		};

		let updated = updated.ok_or_else(|| resource_id.not_found())?;
		self.coherence.invalidate(company_id).await;
		Ok(updated)
	}

	#[instrument(skip(self, principal), fields(subject_id = %principal.subject_id, company_id = %company_id))]
	pub async fn delete(
		&self,
		principal: &Principal,
		company_id: &CompanyId,
		resource_id: ResourceId,
	) -> Result<(), ApiError> {
		authorize(self.companies.as_ref(), principal, company_id, Action::DeleteScopedResource).await?;

		let deleted = match resource_id {
			ResourceId::Product(id) => self.catalog.delete_product(company_id, &id).await?,
			ResourceId::Project(id) => self.catalog.delete_project(company_id, &id).await?,
			ResourceId::Offer(id) => self.catalog.delete_offer(company_id, &id).await?,
		};
		if !deleted {
			return Err(resource_id.not_found());
		}

		self.coherence.invalidate(company_id).await;
		Ok(())
	}

	async fn load(&self, company_id: &CompanyId, resource_id: ResourceId) -> Result<ScopedResource, ApiError> {
		let found = match resource_id {
			ResourceId::Product(id) => self
				.catalog
				.get_product(&id)
				.await?
				.filter(|p| p.company_id == *company_id)
				.map(ScopedResource::Product),
			ResourceId::Project(id) => self
				.catalog
				.get_project(&id)
				.await?
				.filter(|p| p.company_id == *company_id)
				.map(ScopedResource::Project),
			ResourceId::Offer(id) => self
				.catalog
				.get_offer(&id)
				.await?
				.filter(|o| o.company_id == *company_id)
				.map(ScopedResource::Offer),
		};
		found.ok_or_else(|| resource_id.not_found())
	}
}
