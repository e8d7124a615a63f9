// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Company membership handlers. Only the owner (or a SUPERADMIN) may change
//! membership.

use atrium_server_auth::Company;
use axum::{
	extract::{Path, State},
	Json,
};
use serde::Deserialize;

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	error::ApiError,
	validation::{parse_company_id, parse_user_id, require_text, ApiJson},
};

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
	#[serde(default)]
	pub user_id: String,
}

/// POST /api/companies/{id}/members
#[tracing::instrument(skip(state, principal, payload), fields(%id))]
pub async fn add_member(
	RequireAuth(principal): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
	ApiJson(payload): ApiJson<AddMemberRequest>,
) -> Result<Json<Company>, ApiError> {
	let company_id = parse_company_id(&id)?;
	let user_id = parse_user_id(&require_text("user_id", &payload.user_id)?)?;
	Ok(Json(
		state.companies.add_member(&principal, &company_id, &user_id).await?,
	))
}

/// DELETE /api/companies/{id}/members/{user_id}
#[tracing::instrument(skip(state, principal), fields(%id, %user_id))]
pub async fn remove_member(
	RequireAuth(principal): RequireAuth,
	State(state): State<AppState>,
	Path((id, user_id)): Path<(String, String)>,
) -> Result<Json<Company>, ApiError> {
	let company_id = parse_company_id(&id)?;
	let user_id = parse_user_id(&user_id)?;
	Ok(Json(
		state.companies.remove_member(&principal, &company_id, &user_id).await?,
	))
}
