// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The synthesized, read-only view of a company.
//!
//! A [`DerivedView`] is what the cache holds. Its `responses` are templates:
//! `{{path}}` placeholders refer into [`ViewVariables`] by dotted path
//! (`products.0.name`) and are left unresolved.

use atrium_server_auth::company::Company;
use atrium_server_auth::types::{CompanyId, OfferId, ProductId, ProjectId};
use atrium_server_db::{Offer, Product, Project};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version of the view format.
pub const VIEW_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedView {
	pub company_id: CompanyId,
	pub variables: ViewVariables,
	pub responses: Vec<String>,
	pub generated_at: DateTime<Utc>,
	pub version: String,
}

/// Template variables. Resource lists are newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewVariables {
	pub id: CompanyId,
	pub name: String,
	pub website_url: Option<String>,
	pub phone_number: Option<String>,
	pub products: Vec<ProductSummary>,
	pub projects: Vec<ProjectSummary>,
	pub offers: Vec<OfferSummary>,
	pub total_products: usize,
	pub total_projects: usize,
	pub total_offers: usize,
}

impl ViewVariables {
	pub fn new(
		company: &Company,
		products: &[Product],
		projects: &[Project],
		offers: &[Offer],
	) -> Self {
		Self {
			id: company.id,
			name: company.name.clone(),
			website_url: company.website_url.clone(),
			phone_number: company.phone_number.clone(),
			products: products.iter().map(ProductSummary::from).collect(),
			projects: projects.iter().map(ProjectSummary::from).collect(),
			offers: offers.iter().map(OfferSummary::from).collect(),
			total_products: products.len(),
			total_projects: projects.len(),
			total_offers: offers.len(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
	pub id: ProductId,
	pub name: String,
	pub description: String,
	pub price: f64,
	pub category: Option<String>,
}

impl From<&Product> for ProductSummary {
	fn from(p: &Product) -> Self {
		Self {
			id: p.id,
			name: p.name.clone(),
			description: p.description.clone(),
			price: p.price,
			category: p.category.clone(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
	pub id: ProjectId,
	pub name: String,
	pub description: String,
	pub status: Option<String>,
}

impl From<&Project> for ProjectSummary {
	fn from(p: &Project) -> Self {
		Self {
			id: p.id,
			name: p.name.clone(),
			description: p.description.clone(),
			status: p.status.clone(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferSummary {
	pub id: OfferId,
	pub title: String,
	pub description: String,
	pub discount: f64,
	pub valid_until: Option<DateTime<Utc>>,
}

impl From<&Offer> for OfferSummary {
	fn from(o: &Offer) -> Self {
		Self {
			id: o.id,
			title: o.title.clone(),
			description: o.description.clone(),
			discount: o.discount,
			valid_until: o.valid_until,
		}
	}
}
