// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use atrium_server_auth::company::Company;
use atrium_server_auth::types::CompanyId;
use serde::Serialize;
use serde_json::json;

use super::{HandlerOutput, IntentContext, IntentHandler};
use crate::error::IntentError;

/// Shown in place of a missing phone number or website.
const NOT_LISTED: &str = "N/A";

/// Public projection of a company. Ownership and membership are not exposed.
#[derive(Debug, Serialize)]
struct CompanyInfo<'a> {
	id: CompanyId,
	name: &'a str,
	website_url: Option<&'a str>,
	phone_number: Option<&'a str>,
}

impl<'a> From<&'a Company> for CompanyInfo<'a> {
	fn from(c: &'a Company) -> Self {
		Self {
			id: c.id,
			name: &c.name,
			website_url: c.website_url.as_deref(),
			phone_number: c.phone_number.as_deref(),
		}
	}
}

pub struct GetCompanyInfo;

#[async_trait]
impl IntentHandler for GetCompanyInfo {
	async fn handle(&self, ctx: &IntentContext<'_>) -> Result<HandlerOutput, IntentError> {
		let company = ctx.company;
		let (products, projects, offers) = tokio::try_join!(
			ctx.catalog.list_products(&company.id),
			ctx.catalog.list_projects(&company.id),
			ctx.catalog.list_offers(&company.id),
		)?;

		let message = format!(
			"{} can be reached at {} or online at {}.",
			company.name,
			company.phone_number.as_deref().unwrap_or(NOT_LISTED),
			company.website_url.as_deref().unwrap_or(NOT_LISTED),
		);

		Ok(HandlerOutput {
			data: json!({
				"company": CompanyInfo::from(company),
				"total_products": products.len(),
				"total_projects": projects.len(),
				"total_offers": offers.len(),
			}),
			message,
		})
	}
}
