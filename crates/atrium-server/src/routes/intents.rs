// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Public intent endpoint. No principal is required; only the company's
//! existence is checked.

use atrium_server_intent::IntentResponse;
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::{api::AppState, error::ApiError, validation::ApiJson};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
	#[serde(default)]
	pub intent: String,
	#[serde(default, alias = "company_id")]
	pub company_id: String,
	#[serde(default)]
	pub parameters: Option<Value>,
}

/// POST /api/intents
pub async fn handle_intent(
	State(state): State<AppState>,
	ApiJson(payload): ApiJson<IntentRequest>,
) -> Result<Json<IntentResponse>, ApiError> {
	if payload.intent.trim().is_empty() {
		return Err(ApiError::Validation("intent is required".to_string()));
	}
	if payload.company_id.trim().is_empty() {
		return Err(ApiError::Validation("company_id is required".to_string()));
	}

	let response = state
		.intents
		.handle(&payload.intent, &payload.company_id, payload.parameters)
		.await?;
	Ok(Json(response))
}
