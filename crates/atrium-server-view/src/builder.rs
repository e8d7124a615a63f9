// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Builds a company's [`DerivedView`] from the stores.

use atrium_server_auth::types::CompanyId;
use atrium_server_db::{CatalogStore, CompanyStore};
use chrono::Utc;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::instrument;

use crate::error::ViewError;
use crate::view::{DerivedView, OfferSummary, ViewVariables, VIEW_FORMAT_VERSION};

#[derive(Clone)]
pub struct DerivedViewBuilder {
	companies: Arc<dyn CompanyStore>,
	catalog: Arc<dyn CatalogStore>,
}

impl DerivedViewBuilder {
	pub fn new(companies: Arc<dyn CompanyStore>, catalog: Arc<dyn CatalogStore>) -> Self {
		Self { companies, catalog }
	}

	/// Build the view for `company_id`.
	///
	/// The three catalog reads run concurrently and are not taken from a
	/// common snapshot.
	///
	/// # Errors
	/// Returns `ViewError::NotFound` if the company does not exist.
	#[instrument(skip(self), fields(company_id = %company_id))]
	pub async fn build(&self, company_id: &CompanyId) -> Result<DerivedView, ViewError> {
		let company = self
			.companies
			.get_company(company_id)
			.await?
			.ok_or(ViewError::NotFound(*company_id))?;

		let (products, projects, offers) = tokio::try_join!(
			self.catalog.list_products(company_id),
			self.catalog.list_projects(company_id),
			self.catalog.list_offers(company_id),
		)?;

		let variables = ViewVariables::new(&company, &products, &projects, &offers);
		let responses = compose_responses(&variables);

		tracing::debug!(
			company_id = %company_id,
			products = variables.total_products,
			projects = variables.total_projects,
			offers = variables.total_offers,
			"derived view built"
		);

		Ok(DerivedView {
			company_id: company.id,
			variables,
			responses,
			generated_at: Utc::now(),
			version: VIEW_FORMAT_VERSION.to_string(),
		})
	}
}

/// Templated response lines for `vars`, in presentation order.
pub fn compose_responses(vars: &ViewVariables) -> Vec<String> {
	let mut responses = vec![
		"Welcome to {{name}}! How can we help you today?".to_string(),
		"You can reach {{name}} at {{phone_number}} or visit us at {{website_url}}.".to_string(),
	];

	if !vars.products.is_empty() {
		responses.push("We currently offer {{total_products}} product(s).".to_string());
		let mut featured = "Our featured product is {{products.0.name}} at ${{products.0.price}}.".to_string();
		if vars.products.len() > 1 {
			featured.push_str(" We also have {{products.1.name}} at ${{products.1.price}}.");
		}
		responses.push(featured);
	}

	if !vars.projects.is_empty() {
		responses.push(
			"Take a look at our latest project, {{projects.0.name}}: {{projects.0.description}}".to_string(),
		);
	}

	let deals = best_deal_order(&vars.offers);
	if let Some(best) = deals.first() {
		responses.push(format!(
			"Don't miss {{{{offers.{best}.title}}}}, {{{{offers.{best}.discount}}}}% off!"
		));
	}
	if let Some(runner_up) = deals.get(1) {
		responses.push(format!(
			"Also available: {{{{offers.{runner_up}.title}}}} with {{{{offers.{runner_up}.discount}}}}% off."
		));
	}

	responses.push("Thank you for choosing {{name}}!".to_string());
	responses
}

/// Indexes into `offers` ordered by discount, highest first. Ties keep list
/// order.
fn best_deal_order(offers: &[OfferSummary]) -> Vec<usize> {
	let mut order: Vec<usize> = (0..offers.len()).collect();
	order.sort_by(|&a, &b| {
		offers[b]
			.discount
			.partial_cmp(&offers[a].discount)
			.unwrap_or(Ordering::Equal)
	});
	order
}
