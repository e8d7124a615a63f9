// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Company-scoped catalog records.
//!
//! Every record carries the `company_id` it belongs to. That back-reference is
//! authoritative for ownership; the company's id index is informational.

use atrium_server_auth::types::{CompanyId, OfferId, ProductId, ProjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three kinds of company-scoped resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
	Product,
	Project,
	Offer,
}

impl ResourceKind {
	pub fn all() -> &'static [ResourceKind] {
		&[ResourceKind::Product, ResourceKind::Project, ResourceKind::Offer]
	}

	/// Value stored in the `kind` column of the company resource index.
	pub fn as_str(&self) -> &'static str {
		match self {
			ResourceKind::Product => "product",
			ResourceKind::Project => "project",
			ResourceKind::Offer => "offer",
		}
	}

	/// Plural path segment used by the HTTP API.
	pub fn collection(&self) -> &'static str {
		match self {
			ResourceKind::Product => "products",
			ResourceKind::Project => "projects",
			ResourceKind::Offer => "offers",
		}
	}

	/// Parses a plural collection name (`products`, `projects`, `offers`).
	pub fn from_collection(segment: &str) -> Option<Self> {
		match segment {
			"products" => Some(ResourceKind::Product),
			"projects" => Some(ResourceKind::Project),
			"offers" => Some(ResourceKind::Offer),
			_ => None,
		}
	}
}

impl fmt::Display for ResourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ResourceKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"product" => Ok(ResourceKind::Product),
			"project" => Ok(ResourceKind::Project),
			"offer" => Ok(ResourceKind::Offer),
			other => Err(format!("unknown resource kind: {other}")),
		}
	}
}

/// A product sold by a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
	pub id: ProductId,
	pub company_id: CompanyId,
	pub name: String,
	pub description: String,
	pub price: f64,
	pub category: Option<String>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Product {
	pub fn new(
		company_id: CompanyId,
		name: impl Into<String>,
		description: impl Into<String>,
		price: f64,
	) -> Self {
		let now = Utc::now();
		Self {
			id: ProductId::generate(),
			company_id,
			name: name.into(),
			description: description.into(),
			price,
			category: None,
			created_at: now,
			updated_at: now,
		}
	}

	pub fn with_category(mut self, category: impl Into<String>) -> Self {
		self.category = Some(category.into());
		self
	}
}

/// A project showcased by a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
	pub id: ProjectId,
	pub company_id: CompanyId,
	pub name: String,
	pub description: String,
	pub status: Option<String>,
	pub url: Option<String>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Project {
	pub fn new(company_id: CompanyId, name: impl Into<String>, description: impl Into<String>) -> Self {
		let now = Utc::now();
		Self {
			id: ProjectId::generate(),
			company_id,
			name: name.into(),
			description: description.into(),
			status: None,
			url: None,
			created_at: now,
			updated_at: now,
		}
	}

	pub fn with_status(mut self, status: impl Into<String>) -> Self {
		self.status = Some(status.into());
		self
	}
}

/// A discount offer. `discount` is a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
	pub id: OfferId,
	pub company_id: CompanyId,
	pub title: String,
	pub description: String,
	pub discount: f64,
	pub valid_until: Option<DateTime<Utc>>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Offer {
	pub fn new(
		company_id: CompanyId,
		title: impl Into<String>,
		description: impl Into<String>,
		discount: f64,
	) -> Self {
		let now = Utc::now();
		Self {
			id: OfferId::generate(),
			company_id,
			title: title.into(),
			description: description.into(),
			discount,
			valid_until: None,
			created_at: now,
			updated_at: now,
		}
	}

	pub fn with_valid_until(mut self, valid_until: DateTime<Utc>) -> Self {
		self.valid_until = Some(valid_until);
		self
	}
}
