// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use serde_json::json;

use super::{HandlerOutput, IntentContext, IntentHandler};
use crate::error::IntentError;

pub struct GetProjects;

#[async_trait]
impl IntentHandler for GetProjects {
	async fn handle(&self, ctx: &IntentContext<'_>) -> Result<HandlerOutput, IntentError> {
		let projects = ctx.catalog.list_projects(&ctx.company.id).await?;

		let message = match projects.first() {
			Some(latest) => format!(
				"We have {} project(s). Our latest project is {}.",
				projects.len(),
				latest.name
			),
			None => "We don't have any projects to show right now.".to_string(),
		};

		Ok(HandlerOutput {
			data: json!({ "projects": projects, "total": projects.len() }),
			message,
		})
	}
}
