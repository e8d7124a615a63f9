// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Company (tenant) types.
//!
//! A [`Company`] is the unit of tenant isolation. It records its owner, the set
//! of member users, and denormalized id indexes of the products, projects and
//! offers scoped to it. The indexes are informational only: ownership of a
//! scoped resource is decided by the resource's own `company_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::abac::CompanyAttrs;
use crate::types::{CompanyId, OfferId, ProductId, ProjectId, UserId};

/// A tenant owning products, projects and offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
	/// Unique identifier for this company.
	pub id: CompanyId,

	/// Display name, unique across companies.
	pub name: String,

	/// Public website URL.
	pub website_url: Option<String>,

	/// Contact phone number.
	pub phone_number: Option<String>,

	/// The user who created the company. Never changes after creation.
	pub owner_id: UserId,

	/// Users granted access besides the owner. The owner is never listed here.
	pub members: Vec<UserId>,

	/// Product index, in insertion order.
	pub product_ids: Vec<ProductId>,

	/// Project index, in insertion order.
	pub project_ids: Vec<ProjectId>,

	/// Offer index, in insertion order.
	pub offer_ids: Vec<OfferId>,

	/// When the company was created.
	pub created_at: DateTime<Utc>,

	/// When the company was last updated.
	pub updated_at: DateTime<Utc>,
}

impl Company {
	/// Creates a new company owned by `owner_id` with no members or resources.
	pub fn new(name: impl Into<String>, owner_id: UserId) -> Self {
		let now = Utc::now();
		Self {
			id: CompanyId::generate(),
			name: name.into(),
			website_url: None,
			phone_number: None,
			owner_id,
			members: Vec::new(),
			product_ids: Vec::new(),
			project_ids: Vec::new(),
			offer_ids: Vec::new(),
			created_at: now,
			updated_at: now,
		}
	}

	/// Builder: set the website URL.
	pub fn with_website(mut self, website_url: impl Into<String>) -> Self {
		self.website_url = Some(website_url.into());
		self
	}

	/// Builder: set the phone number.
	pub fn with_phone(mut self, phone_number: impl Into<String>) -> Self {
		self.phone_number = Some(phone_number.into());
		self
	}

	/// Returns true if `user_id` owns this company.
	pub fn is_owner(&self, user_id: UserId) -> bool {
		self.owner_id == user_id
	}

	/// Returns true if `user_id` is a member (the owner is not a member).
	pub fn is_member(&self, user_id: UserId) -> bool {
		self.members.contains(&user_id)
	}

	/// The attributes the authorization engine evaluates for this company.
	pub fn attrs(&self) -> CompanyAttrs {
		CompanyAttrs {
			company_id: self.id,
			owner_id: self.owner_id,
			members: self.members.clone(),
		}
	}
}
