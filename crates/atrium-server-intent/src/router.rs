// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Unauthenticated intent dispatch.
//!
//! The router resolves the intent name through the alias table, checks that
//! the company exists, and hands off to the handler registered for the
//! canonical tag. No access decision is made: every company's catalog is
//! answerable by anyone who knows its id.

use atrium_server_auth::types::CompanyId;
use atrium_server_db::{CatalogStore, CompanyStore};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use crate::error::IntentError;
use crate::handlers::{
	GetCompanyInfo, GetOffers, GetProductDetails, GetProducts, GetProjects, IntentContext,
	IntentHandler, SearchProducts,
};
use crate::intent::{resolve_intent, CanonicalIntent};
use crate::params::IntentParameters;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentResponse {
	pub success: bool,
	/// The intent name exactly as received.
	pub intent: String,
	pub data: Value,
	pub message: String,
	pub timestamp: DateTime<Utc>,
}

pub struct IntentRouter {
	companies: Arc<dyn CompanyStore>,
	catalog: Arc<dyn CatalogStore>,
	handlers: HashMap<CanonicalIntent, Arc<dyn IntentHandler>>,
}

impl IntentRouter {
	/// Router with the built-in handler for every canonical intent.
	pub fn new(companies: Arc<dyn CompanyStore>, catalog: Arc<dyn CatalogStore>) -> Self {
		let mut handlers: HashMap<CanonicalIntent, Arc<dyn IntentHandler>> = HashMap::new();
		handlers.insert(CanonicalIntent::GetProducts, Arc::new(GetProducts));
		handlers.insert(CanonicalIntent::GetProductDetails, Arc::new(GetProductDetails));
		handlers.insert(CanonicalIntent::GetProjects, Arc::new(GetProjects));
		handlers.insert(CanonicalIntent::GetOffers, Arc::new(GetOffers));
		handlers.insert(CanonicalIntent::GetCompanyInfo, Arc::new(GetCompanyInfo));
		handlers.insert(CanonicalIntent::SearchProducts, Arc::new(SearchProducts));

		Self {
			companies,
			catalog,
			handlers,
		}
	}

	/// Replace the handler for one canonical intent.
	pub fn with_handler(mut self, intent: CanonicalIntent, handler: Arc<dyn IntentHandler>) -> Self {
		self.handlers.insert(intent, handler);
		self
	}

	/// Answer `intent` for the company identified by `company_id`.
	///
	/// # Errors
	/// - `UnknownIntent` if the name matches no alias; checked before any
	///   store access
	/// - `MalformedIdentifier` if `company_id` is not a UUID
	/// - `CompanyNotFound` if no such company exists
	/// - `Validation` for missing or invalid parameters
	#[instrument(skip(self, parameters), fields(intent = %intent, company_id = %company_id))]
	pub async fn handle(
		&self,
		intent: &str,
		company_id: &str,
		parameters: Option<Value>,
	) -> Result<IntentResponse, IntentError> {
		let canonical = resolve_intent(intent).ok_or_else(|| IntentError::UnknownIntent(intent.to_string()))?;
		let handler = self
			.handlers
			.get(&canonical)
			.ok_or_else(|| IntentError::UnknownIntent(intent.to_string()))?;

		let company_id = CompanyId::parse(company_id)?;
		let params = IntentParameters::from_json(parameters)?;

		let company = self
			.companies
			.get_company(&company_id)
			.await?
			.ok_or(IntentError::CompanyNotFound(company_id))?;

		let ctx = IntentContext {
			company: &company,
			params: &params,
			catalog: self.catalog.as_ref(),
		};
		let output = handler.handle(&ctx).await?;

		tracing::debug!(intent = %canonical, company_id = %company_id, "intent handled");

		Ok(IntentResponse {
			success: true,
			intent: intent.to_string(),
			data: output.data,
			message: output.message,
			timestamp: Utc::now(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use atrium_server_auth::{company::Company, types::UserId};
	use atrium_server_db::testing::create_test_pool;
	use atrium_server_db::{CatalogRepository, CompanyRepository, Offer, Product, Project};
	use chrono::Duration;
	use serde_json::json;

	struct Fixture {
		router: IntentRouter,
		catalog: CatalogRepository,
		company: Company,
	}

	async fn fixture() -> Fixture {
		let pool = create_test_pool().await;
		let companies = CompanyRepository::new(pool.clone());
		let catalog = CatalogRepository::new(pool);
		let company = Company::new("Acme", UserId::generate())
			.with_website("https://acme.test")
			.with_phone("+1 555 0100");
		companies.create_company(&company).await.unwrap();

		Fixture {
			router: IntentRouter::new(Arc::new(companies), Arc::new(catalog.clone())),
			catalog,
			company,
		}
	}

	/// Two products; "Gadget" is the newest.
	async fn with_products(f: &Fixture) {
		let mut widget = Product::new(f.company.id, "Widget", "A small widget", 9.5);
		widget.created_at = Utc::now() - Duration::seconds(60);
		f.catalog.create_product(&widget).await.unwrap();
		f.catalog
			.create_product(&Product::new(f.company.id, "Gadget", "A shiny gadget", 19.99))
			.await
			.unwrap();
	}

	mod dispatch {
		use super::*;

		#[tokio::test]
		async fn unknown_intent_is_rejected_before_company_lookup() {
			let f = fixture().await;

			let err = f
				.router
				.handle("foo_bar", &f.company.id.to_string(), None)
				.await
				.unwrap_err();
			assert!(matches!(err, IntentError::UnknownIntent(ref name) if name == "foo_bar"));

			let err = f.router.handle("foo_bar", "not-a-uuid", None).await.unwrap_err();
			assert!(matches!(err, IntentError::UnknownIntent(_)));

			assert!(f.catalog.list_products(&f.company.id).await.unwrap().is_empty());
		}

		#[tokio::test]
		async fn malformed_and_missing_companies_are_distinguished() {
			let f = fixture().await;

			let err = f.router.handle("get_products", "nope", None).await.unwrap_err();
			assert!(matches!(err, IntentError::MalformedIdentifier(_)));

			let missing = CompanyId::generate().to_string();
			let err = f.router.handle("get_products", &missing, None).await.unwrap_err();
			assert!(matches!(err, IntentError::CompanyNotFound(_)));
		}

		#[tokio::test]
		async fn response_echoes_raw_intent() {
			let f = fixture().await;
			let response = f
				.router
				.handle(" List_Products", &f.company.id.to_string(), None)
				.await
				.unwrap();
			assert!(response.success);
			assert_eq!(response.intent, " List_Products");
		}
	}

	mod products {
		use super::*;

		#[tokio::test]
		async fn limit_caps_listing_and_names_featured_product() {
			let f = fixture().await;
			with_products(&f).await;

			let response = f
				.router
				.handle("get_products", &f.company.id.to_string(), Some(json!({"limit": 1})))
				.await
				.unwrap();

			assert_eq!(response.data["products"].as_array().unwrap().len(), 1);
			assert_eq!(response.data["total"], 1);
			assert_eq!(
				response.message,
				"We have 1 product(s) available. Our featured product is Gadget at $19.99."
			);
		}

		#[tokio::test]
		async fn empty_catalog_message() {
			let f = fixture().await;
			let response = f
				.router
				.handle("show_products", &f.company.id.to_string(), None)
				.await
				.unwrap();
			assert!(response.success);
			assert_eq!(response.message, "We don't have any products available at the moment.");
			assert_eq!(response.data["total"], 0);
		}

		#[tokio::test]
		async fn invalid_limit_is_validation_failure() {
			let f = fixture().await;
			let err = f
				.router
				.handle("get_products", &f.company.id.to_string(), Some(json!({"limit": 0})))
				.await
				.unwrap_err();
			assert!(matches!(err, IntentError::Validation(_)));
		}

		#[tokio::test]
		async fn product_details_match_case_insensitively() {
			let f = fixture().await;
			with_products(&f).await;

			let response = f
				.router
				.handle("product_info", &f.company.id.to_string(), Some(json!({"productName": "widg"})))
				.await
				.unwrap();
			assert_eq!(response.data["found"], true);
			assert_eq!(response.message, "Widget is available for $9.50. A small widget");

			let response = f
				.router
				.handle("get_product_details", &f.company.id.to_string(), Some(json!({"name": "Sprocket"})))
				.await
				.unwrap();
			assert_eq!(response.data, json!({"found": false}));
			assert_eq!(response.message, "Sorry, I couldn't find a product named \"Sprocket\".");
		}

		#[tokio::test]
		async fn product_details_requires_a_name() {
			let f = fixture().await;
			let err = f
				.router
				.handle("get_product_details", &f.company.id.to_string(), Some(json!({})))
				.await
				.unwrap_err();
			assert!(matches!(err, IntentError::Validation(_)));
		}

		#[tokio::test]
		async fn search_matches_name_or_description() {
			let f = fixture().await;
			with_products(&f).await;

			let response = f
				.router
				.handle("search_products", &f.company.id.to_string(), Some(json!({"search": "SHINY"})))
				.await
				.unwrap();
			assert_eq!(response.data["products"].as_array().unwrap().len(), 1);
			assert_eq!(response.message, "I found 1 product(s) matching \"SHINY\".");
		}

		#[tokio::test]
		async fn search_without_matches_still_succeeds() {
			let f = fixture().await;
			with_products(&f).await;

			let response = f
				.router
				.handle("search_products", &f.company.id.to_string(), Some(json!({"query": "zzz"})))
				.await
				.unwrap();
			assert!(response.success);
			assert!(response.data["products"].as_array().unwrap().is_empty());
			assert_eq!(response.data["query"], "zzz");
			assert!(response.message.contains("couldn't find"));
		}

		#[tokio::test]
		async fn search_results_are_capped() {
			let f = fixture().await;
			for i in 0..7 {
				f.catalog
					.create_product(&Product::new(f.company.id, format!("Bolt {i}"), "", 1.0))
					.await
					.unwrap();
			}

			let response = f
				.router
				.handle("search_products", &f.company.id.to_string(), Some(json!({"query": "bolt"})))
				.await
				.unwrap();
			assert_eq!(response.data["products"].as_array().unwrap().len(), 5);
		}
	}

	mod projects_offers_company {
		use super::*;

		#[tokio::test]
		async fn projects_message_names_latest() {
			let f = fixture().await;
			let mut old = Project::new(f.company.id, "Bridge", "");
			old.created_at = Utc::now() - Duration::seconds(60);
			f.catalog.create_project(&old).await.unwrap();
			f.catalog
				.create_project(&Project::new(f.company.id, "Tower", ""))
				.await
				.unwrap();

			let response = f
				.router
				.handle("list_projects", &f.company.id.to_string(), None)
				.await
				.unwrap();
			assert_eq!(response.message, "We have 2 project(s). Our latest project is Tower.");
		}

		#[tokio::test]
		async fn empty_projects_and_offers_messages() {
			let f = fixture().await;
			let id = f.company.id.to_string();

			let projects = f.router.handle("get_projects", &id, None).await.unwrap();
			assert_eq!(projects.message, "We don't have any projects to show right now.");

			let offers = f.router.handle("get_offers", &id, None).await.unwrap();
			assert_eq!(offers.message, "There are no special offers available right now.");
		}

		#[tokio::test]
		async fn offers_are_sorted_by_discount() {
			let f = fixture().await;
			for (title, discount) in [("Small", 5.0), ("Big", 40.0), ("Mid", 12.5)] {
				f.catalog
					.create_offer(&Offer::new(f.company.id, title, "", discount))
					.await
					.unwrap();
			}

			let response = f
				.router
				.handle("show_deals", &f.company.id.to_string(), None)
				.await
				.unwrap();
			assert_eq!(
				response.message,
				"We have 3 special offer(s)! The best deal is Big with 40% off."
			);
			let titles: Vec<&str> = response.data["offers"]
				.as_array()
				.unwrap()
				.iter()
				.map(|o| o["title"].as_str().unwrap())
				.collect();
			assert_eq!(titles, vec!["Big", "Mid", "Small"]);
		}

		#[tokio::test]
		async fn company_info_hides_membership() {
			let f = fixture().await;
			with_products(&f).await;

			let response = f
				.router
				.handle("company_details", &f.company.id.to_string(), None)
				.await
				.unwrap();
			assert_eq!(
				response.message,
				"Acme can be reached at +1 555 0100 or online at https://acme.test."
			);
			assert_eq!(response.data["total_products"], 2);
			assert_eq!(response.data["total_offers"], 0);
			assert!(response.data["company"].get("owner_id").is_none());
			assert!(response.data["company"].get("members").is_none());
		}
	}
}
