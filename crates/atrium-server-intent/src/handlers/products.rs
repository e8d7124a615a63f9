// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use atrium_server_db::Product;
use serde_json::json;

use super::{HandlerOutput, IntentContext, IntentHandler};
use crate::error::IntentError;

/// Maximum number of search results.
pub const SEARCH_RESULT_CAP: usize = 5;

pub struct GetProducts;

#[async_trait]
impl IntentHandler for GetProducts {
	async fn handle(&self, ctx: &IntentContext<'_>) -> Result<HandlerOutput, IntentError> {
		let limit = ctx.params.limit()?;
		let mut products = ctx.catalog.list_products(&ctx.company.id).await?;
		products.truncate(limit);

		let message = match products.first() {
			Some(featured) => format!(
				"We have {} product(s) available. Our featured product is {} at ${:.2}.",
				products.len(),
				featured.name,
				featured.price
			),
			None => "We don't have any products available at the moment.".to_string(),
		};

		Ok(HandlerOutput {
			data: json!({ "products": products, "total": products.len() }),
			message,
		})
	}
}

pub struct GetProductDetails;

#[async_trait]
impl IntentHandler for GetProductDetails {
	async fn handle(&self, ctx: &IntentContext<'_>) -> Result<HandlerOutput, IntentError> {
		let query = ctx.params.require_text(&["productName", "name"])?;
		let needle = query.to_lowercase();

		let products = ctx.catalog.list_products(&ctx.company.id).await?;
		let found = products
			.into_iter()
			.find(|p| p.name.to_lowercase().contains(&needle));

		Ok(match found {
			Some(product) => HandlerOutput {
				message: format!(
					"{} is available for ${:.2}. {}",
					product.name, product.price, product.description
				)
				.trim_end()
				.to_string(),
				data: json!({ "found": true, "product": product }),
			},
			None => HandlerOutput {
				message: format!("Sorry, I couldn't find a product named \"{query}\"."),
				data: json!({ "found": false }),
			},
		})
	}
}

pub struct SearchProducts;

#[async_trait]
impl IntentHandler for SearchProducts {
	async fn handle(&self, ctx: &IntentContext<'_>) -> Result<HandlerOutput, IntentError> {
		let query = ctx.params.require_text(&["query", "search"])?;
		let needle = query.to_lowercase();

		let matches: Vec<Product> = ctx
			.catalog
			.list_products(&ctx.company.id)
			.await?
			.into_iter()
			.filter(|p| {
				p.name.to_lowercase().contains(&needle) || p.description.to_lowercase().contains(&needle)
			})
			.take(SEARCH_RESULT_CAP)
			.collect();

		let message = if matches.is_empty() {
			format!("Sorry, I couldn't find any products matching \"{query}\".")
		} else {
			format!("I found {} product(s) matching \"{query}\".", matches.len())
		};

		Ok(HandlerOutput {
			data: json!({ "products": matches, "query": query }),
			message,
		})
	}
}
