// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use atrium_server_auth::{listing_scope, Action, Company, CompanyId, Principal, UserId};
use atrium_server_db::CompanyStore;
use atrium_server_view::CacheCoherenceManager;
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use super::{authorize, company_not_found};
use crate::error::ApiError;
use crate::validation::{optional_text, require_text};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCompanyRequest {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub website_url: Option<String>,
	#[serde(default)]
	pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCompanyRequest {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub website_url: Option<String>,
	#[serde(default)]
	pub phone_number: Option<String>,
}

#[derive(Clone)]
pub struct CompanyService {
	companies: Arc<dyn CompanyStore>,
	coherence: Arc<CacheCoherenceManager>,
	list_includes_memberships: bool,
}

impl CompanyService {
	pub fn new(
		companies: Arc<dyn CompanyStore>,
		coherence: Arc<CacheCoherenceManager>,
		list_includes_memberships: bool,
	) -> Self {
		Self {
			companies,
			coherence,
			list_includes_memberships,
		}
	}

	/// Creates a company owned by the caller.
	#[instrument(skip(self, principal, req), fields(subject_id = %principal.subject_id))]
	pub async fn create(&self, principal: &Principal, req: CreateCompanyRequest) -> Result<Company, ApiError> {
		let mut company = Company::new(require_text("name", &req.name)?, principal.subject_id);
		company.website_url = req.website_url;
		company.phone_number = req.phone_number;

		self.companies.create_company(&company).await?;
		tracing::info!(company_id = %company.id, owner_id = %company.owner_id, "company created");
		Ok(company)
	}

	#[instrument(skip(self, principal), fields(subject_id = %principal.subject_id))]
	pub async fn list(&self, principal: &Principal) -> Result<Vec<Company>, ApiError> {
		let scope = listing_scope(principal, self.list_includes_memberships);
		Ok(self.companies.list_companies(scope).await?)
	}

	pub async fn get(&self, principal: &Principal, company_id: &CompanyId) -> Result<Company, ApiError> {
		authorize(self.companies.as_ref(), principal, company_id, Action::ReadCompany).await
	}

	#[instrument(skip(self, principal, req), fields(subject_id = %principal.subject_id, company_id = %company_id))]
	pub async fn update(
		&self,
		principal: &Principal,
		company_id: &CompanyId,
		req: UpdateCompanyRequest,
	) -> Result<Company, ApiError> {
		let name = optional_text("name", req.name)?;
		let mut company = authorize(self.companies.as_ref(), principal, company_id, Action::UpdateCompany).await?;

		if let Some(name) = name {
			company.name = name;
		}
		if req.website_url.is_some() {
			company.website_url = req.website_url;
		}
		if req.phone_number.is_some() {
			company.phone_number = req.phone_number;
		}
		company.updated_at = Utc::now();

		if !self.companies.update_company(&company).await? {
			return Err(company_not_found(company_id));
		}
		self.coherence.invalidate(company_id).await;
		Ok(company)
	}

	#[instrument(skip(self, principal), fields(subject_id = %principal.subject_id, company_id = %company_id))]
	pub async fn delete(&self, principal: &Principal, company_id: &CompanyId) -> Result<(), ApiError> {
		authorize(self.companies.as_ref(), principal, company_id, Action::DeleteCompany).await?;

		if !self.companies.delete_company(company_id).await? {
			return Err(company_not_found(company_id));
		}
		self.coherence.forget(company_id).await;
		tracing::info!(company_id = %company_id, "company deleted");
		Ok(())
	}

	/// Grants `user_id` access. Adding an existing member is a no-op; the
	/// owner cannot be added.
	#[instrument(skip(self, principal), fields(subject_id = %principal.subject_id, company_id = %company_id))]
	pub async fn add_member(
		&self,
		principal: &Principal,
		company_id: &CompanyId,
		user_id: &UserId,
	) -> Result<Company, ApiError> {
		let company = authorize(self.companies.as_ref(), principal, company_id, Action::AddMember).await?;
		if company.is_owner(*user_id) {
			return Err(ApiError::Validation(
				"the owner already has access to the company".to_string(),
			));
		}

		if self.companies.add_member(company_id, user_id).await? {
			self.coherence.invalidate(company_id).await;
			tracing::info!(company_id = %company_id, user_id = %user_id, "member added");
		}

		self.reload(company_id).await
	}

	#[instrument(skip(self, principal), fields(subject_id = %principal.subject_id, company_id = %company_id))]
	pub async fn remove_member(
		&self,
		principal: &Principal,
		company_id: &CompanyId,
		user_id: &UserId,
	) -> Result<Company, ApiError> {
		authorize(self.companies.as_ref(), principal, company_id, Action::RemoveMember).await?;

		if !self.companies.remove_member(company_id, user_id).await? {
			return Err(ApiError::NotFound(format!(
				"User {user_id} is not a member of company {company_id}"
			)));
		}
		self.coherence.invalidate(company_id).await;
		tracing::info!(company_id = %company_id, user_id = %user_id, "member removed");

		self.reload(company_id).await
	}

	async fn reload(&self, company_id: &CompanyId) -> Result<Company, ApiError> {
		self.companies
			.get_company(company_id)
			.await?
			.ok_or_else(|| company_not_found(company_id))
	}
}
