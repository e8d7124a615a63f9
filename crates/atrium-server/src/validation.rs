// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared validation utilities for API handlers.
//!
//! Identifiers arrive as path strings and are parsed here so a malformed id is
//! reported as 400 before any store access. Body validation is limited to
//! required-field checks.

use atrium_server_auth::{CompanyId, OfferId, ProductId, ProjectId, UserId};
use atrium_server_db::ResourceKind;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// JSON body extractor whose rejection is an [`ApiError::Validation`].
///
/// The body must be a JSON object; arrays and scalars are rejected even when
/// they would deserialize into `T`.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
	S: Send + Sync,
	T: DeserializeOwned,
{
	type Rejection = ApiError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let Json(value) = Json::<Value>::from_request(req, state).await?;
		decode_object(value).map(ApiJson)
	}
}

/// Decodes a request body that must be a JSON object.
pub fn decode_object<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
	if !body.is_object() {
		return Err(ApiError::Validation(
			"request body must be a JSON object".to_string(),
		));
	}
	serde_json::from_value(body).map_err(|e| ApiError::Validation(e.to_string()))
}

pub fn parse_company_id(raw: &str) -> Result<CompanyId, ApiError> {
	Ok(CompanyId::parse(raw)?)
}

pub fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
	Ok(UserId::parse(raw)?)
}

pub fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
	Ok(ProductId::parse(raw)?)
}

pub fn parse_project_id(raw: &str) -> Result<ProjectId, ApiError> {
	Ok(ProjectId::parse(raw)?)
}

pub fn parse_offer_id(raw: &str) -> Result<OfferId, ApiError> {
	Ok(OfferId::parse(raw)?)
}

/// Maps the `{kind}` path segment to a resource kind. Anything other than
/// `products`, `projects` or `offers` is a 404.
pub fn parse_resource_kind(segment: &str) -> Result<ResourceKind, ApiError> {
	ResourceKind::from_collection(segment)
		.ok_or_else(|| ApiError::NotFound(format!("Unknown collection: {segment}")))
}

/// Trims `value` and rejects it when empty.
pub fn require_text(field: &str, value: &str) -> Result<String, ApiError> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return Err(ApiError::Validation(format!("{field} is required")));
	}
	Ok(trimmed.to_string())
}

/// Like [`require_text`] for optional PATCH fields: absent passes, present
/// must be non-empty.
pub fn optional_text(field: &str, value: Option<String>) -> Result<Option<String>, ApiError> {
	value.map(|v| require_text(field, &v)).transpose()
}
