// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request-independent operations behind the HTTP handlers.
//!
//! Every tenant-scoped operation loads the company, asks the authorization
//! engine, and only then touches the stores. Mutations invalidate the
//! company's cached view after the write commits.

mod catalog;
mod company;
mod view;

pub use catalog::{
	CatalogService, CreateOfferRequest, CreateProductRequest, CreateProjectRequest, ResourceId,
	ScopedResource, UpdateOfferRequest, UpdateProductRequest, UpdateProjectRequest,
};
pub use company::{CompanyService, CreateCompanyRequest, UpdateCompanyRequest};
pub use view::ViewService;

use atrium_server_auth::{decide, Action, Company, CompanyId, Decision, Principal};
use atrium_server_db::CompanyStore;

use crate::error::ApiError;

/// Loads `company_id` and checks `action` against it.
///
/// NotFound and Forbidden are distinct: existence is not hidden from a
/// principal who is denied.
pub(crate) async fn authorize(
	companies: &dyn CompanyStore,
	principal: &Principal,
	company_id: &CompanyId,
	action: Action,
) -> Result<Company, ApiError> {
	let company = companies
		.get_company(company_id)
		.await?
		.ok_or_else(|| company_not_found(company_id))?;

	match decide(principal, &company.attrs(), action) {
		Decision::Allow => Ok(company),
		Decision::Deny(reason) => Err(ApiError::Forbidden(reason)),
	}
}

pub(crate) fn company_not_found(company_id: &CompanyId) -> ApiError {
	ApiError::NotFound(format!("Company not found: {company_id}"))
}
