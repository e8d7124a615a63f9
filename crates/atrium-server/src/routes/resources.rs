// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Scoped resource handlers for `/api/companies/{id}/{kind}`, where `kind`
//! is `products`, `projects` or `offers`.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use serde_json::{Map, Value};

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	error::ApiError,
	services::{ResourceId, ScopedResource},
	validation::{parse_company_id, parse_resource_kind, ApiJson},
};

/// GET /api/companies/{id}/{kind} - `{"<kind>": [...], "total": n}`, newest first.
#[tracing::instrument(skip(state, principal), fields(%id, %kind))]
pub async fn list_resources(
	RequireAuth(principal): RequireAuth,
	State(state): State<AppState>,
	Path((id, kind)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
	let company_id = parse_company_id(&id)?;
	let kind = parse_resource_kind(&kind)?;

	let items = state.catalog.list(&principal, &company_id, kind).await?;
	let total = items.len();
	let items = serde_json::to_value(items).map_err(|e| ApiError::Internal(e.to_string()))?;

	let mut body = Map::new();
	body.insert(kind.collection().to_string(), items);
	body.insert("total".to_string(), Value::from(total));
	Ok(Json(Value::Object(body)))
}

/// POST /api/companies/{id}/{kind}
#[tracing::instrument(skip(state, principal, payload), fields(%id, %kind))]
pub async fn create_resource(
	RequireAuth(principal): RequireAuth,
	State(state): State<AppState>,
	Path((id, kind)): Path<(String, String)>,
	ApiJson(payload): ApiJson<Value>,
) -> Result<impl IntoResponse, ApiError> {
	let company_id = parse_company_id(&id)?;
	let kind = parse_resource_kind(&kind)?;

	let created = state.catalog.create(&principal, &company_id, kind, payload).await?;
	Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/companies/{id}/{kind}/{resource_id}
#[tracing::instrument(skip(state, principal), fields(%id, %kind, %resource_id))]
pub async fn get_resource(
	RequireAuth(principal): RequireAuth,
	State(state): State<AppState>,
	Path((id, kind, resource_id)): Path<(String, String, String)>,
) -> Result<Json<ScopedResource>, ApiError> {
	let company_id = parse_company_id(&id)?;
	let resource_id = ResourceId::parse(parse_resource_kind(&kind)?, &resource_id)?;
	Ok(Json(state.catalog.get(&principal, &company_id, resource_id).await?))
}

/// PATCH /api/companies/{id}/{kind}/{resource_id}
#[tracing::instrument(skip(state, principal, payload), fields(%id, %kind, %resource_id))]
pub async fn update_resource(
	RequireAuth(principal): RequireAuth,
	State(state): State<AppState>,
	Path((id, kind, resource_id)): Path<(String, String, String)>,
	ApiJson(payload): ApiJson<Value>,
) -> Result<Json<ScopedResource>, ApiError> {
	let company_id = parse_company_id(&id)?;
	let resource_id = ResourceId::parse(parse_resource_kind(&kind)?, &resource_id)?;
	Ok(Json(
		state.catalog.update(&principal, &company_id, resource_id, payload).await?,
	))
}

/// DELETE /api/companies/{id}/{kind}/{resource_id}
#[tracing::instrument(skip(state, principal), fields(%id, %kind, %resource_id))]
pub async fn delete_resource(
	RequireAuth(principal): RequireAuth,
	State(state): State<AppState>,
	Path((id, kind, resource_id)): Path<(String, String, String)>,
) -> Result<StatusCode, ApiError> {
	let company_id = parse_company_id(&id)?;
	let resource_id = ResourceId::parse(parse_resource_kind(&kind)?, &resource_id)?;
	state.catalog.delete(&principal, &company_id, resource_id).await?;
	Ok(StatusCode::NO_CONTENT)
}
