// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Derived view handlers.

use atrium_server_view::DerivedView;
use axum::{
	extract::{Path, State},
	Json,
};

use crate::{api::AppState, auth_middleware::RequireAuth, error::ApiError, validation::parse_company_id};

/// GET /api/companies/{id}/view - cached view, rebuilt on a miss.
#[tracing::instrument(skip(state, principal), fields(%id))]
pub async fn get_view(
	RequireAuth(principal): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<DerivedView>, ApiError> {
	let company_id = parse_company_id(&id)?;
	Ok(Json(state.views.view(&principal, &company_id).await?))
}

/// GET /api/companies/{id}/view/preview - uncached rebuild.
#[tracing::instrument(skip(state, principal), fields(%id))]
pub async fn preview_view(
	RequireAuth(principal): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<DerivedView>, ApiError> {
	let company_id = parse_company_id(&id)?;
	Ok(Json(state.views.preview(&principal, &company_id).await?))
}
