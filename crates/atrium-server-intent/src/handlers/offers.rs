// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use serde_json::json;
use std::cmp::Ordering;

use super::{HandlerOutput, IntentContext, IntentHandler};
use crate::error::IntentError;

pub struct GetOffers;

#[async_trait]
impl IntentHandler for GetOffers {
	async fn handle(&self, ctx: &IntentContext<'_>) -> Result<HandlerOutput, IntentError> {
		let mut offers = ctx.catalog.list_offers(&ctx.company.id).await?;
		offers.sort_by(|a, b| b.discount.partial_cmp(&a.discount).unwrap_or(Ordering::Equal));

		let message = match offers.first() {
			Some(best) => format!(
				"We have {} special offer(s)! The best deal is {} with {}% off.",
				offers.len(),
				best.title,
				best.discount
			),
			None => "There are no special offers available right now.".to_string(),
		};

		Ok(HandlerOutput {
			data: json!({ "offers": offers, "total": offers.len() }),
			message,
		})
	}
}
