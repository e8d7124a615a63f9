// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Company HTTP handlers.

use atrium_server_auth::Company;
use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use serde::Serialize;

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	error::ApiError,
	services::{CreateCompanyRequest, UpdateCompanyRequest},
	validation::{parse_company_id, ApiJson},
};

#[derive(Debug, Serialize)]
pub struct ListCompaniesResponse {
	pub companies: Vec<Company>,
	pub total: usize,
}

/// POST /api/companies - create a company owned by the caller.
pub async fn create_company(
	RequireAuth(principal): RequireAuth,
	State(state): State<AppState>,
	ApiJson(payload): ApiJson<CreateCompanyRequest>,
) -> Result<impl IntoResponse, ApiError> {
	let company = state.companies.create(&principal, payload).await?;
	Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/companies - companies visible to the caller.
pub async fn list_companies(
	RequireAuth(principal): RequireAuth,
	State(state): State<AppState>,
) -> Result<Json<ListCompaniesResponse>, ApiError> {
	let companies = state.companies.list(&principal).await?;
	Ok(Json(ListCompaniesResponse {
		total: companies.len(),
		companies,
	}))
}

/// GET /api/companies/{id}
#[tracing::instrument(skip(state, principal), fields(%id))]
pub async fn get_company(
	RequireAuth(principal): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Company>, ApiError> {
	let company_id = parse_company_id(&id)?;
	Ok(Json(state.companies.get(&principal, &company_id).await?))
}

/// PATCH /api/companies/{id}
#[tracing::instrument(skip(state, principal, payload), fields(%id))]
pub async fn update_company(
	RequireAuth(principal): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
	ApiJson(payload): ApiJson<UpdateCompanyRequest>,
) -> Result<Json<Company>, ApiError> {
	let company_id = parse_company_id(&id)?;
	Ok(Json(state.companies.update(&principal, &company_id, payload).await?))
}

/// DELETE /api/companies/{id}
#[tracing::instrument(skip(state, principal), fields(%id))]
pub async fn delete_company(
	RequireAuth(principal): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
	let company_id = parse_company_id(&id)?;
	state.companies.delete(&principal, &company_id).await?;
	Ok(StatusCode::NO_CONTENT)
}
