// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! API error types and HTTP response conversions.

use atrium_server_auth::{AuthenticationRequired, DenyReason, MalformedIdentifier};
use atrium_server_db::DbError;
use atrium_server_intent::IntentError;
use atrium_server_view::ViewError;
use axum::{
	extract::rejection::JsonRejection,
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::{Deserialize, Serialize};

/// Errors surfaced at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	/// No valid credentials on the request.
	#[error("Authentication required")]
	Unauthorized,

	/// The principal may not perform the action on this company.
	#[error("Access denied: {0}")]
	Forbidden(DenyReason),

	/// Company or scoped resource does not exist.
	#[error("{0}")]
	NotFound(String),

	/// A path or body identifier is not a UUID.
	#[error(transparent)]
	MalformedIdentifier(#[from] MalformedIdentifier),

	/// Missing or invalid request fields.
	#[error("{0}")]
	Validation(String),

	/// Intent name matched no alias.
	#[error("Unknown intent: {0}")]
	UnknownIntent(String),

	/// Uniqueness violation, e.g. a duplicate company name.
	#[error("{0}")]
	Conflict(String),

	/// Collaborator failure. Details are logged, never returned.
	#[error("Internal error: {0}")]
	Internal(String),
}

impl ApiError {
	pub fn status(&self) -> StatusCode {
		match self {
			ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
			ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
			ApiError::NotFound(_) => StatusCode::NOT_FOUND,
			ApiError::MalformedIdentifier(_) | ApiError::Validation(_) | ApiError::UnknownIntent(_) => {
				StatusCode::BAD_REQUEST
			}
			ApiError::Conflict(_) => StatusCode::CONFLICT,
			ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Stable machine-readable code for the `error` field.
	pub fn code(&self) -> &'static str {
		match self {
			ApiError::Unauthorized => "unauthorized",
			ApiError::Forbidden(_) => "forbidden",
			ApiError::NotFound(_) => "not_found",
			ApiError::MalformedIdentifier(_) => "invalid_id",
			ApiError::Validation(_) => "validation_failed",
			ApiError::UnknownIntent(_) => "unknown_intent",
			ApiError::Conflict(_) => "conflict",
			ApiError::Internal(_) => "internal_error",
		}
	}
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let message = match &self {
			ApiError::Internal(detail) => {
				tracing::error!(error = %detail, "internal error");
				"An internal error occurred".to_string()
			}
			other => other.to_string(),
		};

		let body = ErrorResponse {
			error: self.code().to_string(),
			message,
		};
		(self.status(), Json(body)).into_response()
	}
}

impl From<AuthenticationRequired> for ApiError {
	fn from(_: AuthenticationRequired) -> Self {
		ApiError::Unauthorized
	}
}

impl From<DbError> for ApiError {
	fn from(err: DbError) -> Self {
		match err {
			DbError::NotFound(what) => ApiError::NotFound(format!("Not found: {what}")),
			DbError::Conflict(what) => ApiError::Conflict(format!("Already exists: {what}")),
			other => ApiError::Internal(other.to_string()),
		}
	}
}

impl From<ViewError> for ApiError {
	fn from(err: ViewError) -> Self {
		match err {
			ViewError::NotFound(id) => ApiError::NotFound(format!("Company not found: {id}")),
			ViewError::Db(e) => e.into(),
		}
	}
}

impl From<IntentError> for ApiError {
	fn from(err: IntentError) -> Self {
		match err {
			IntentError::UnknownIntent(intent) => ApiError::UnknownIntent(intent),
			IntentError::MalformedIdentifier(e) => ApiError::MalformedIdentifier(e),
			IntentError::CompanyNotFound(id) => ApiError::NotFound(format!("Company not found: {id}")),
			IntentError::Validation(msg) => ApiError::Validation(msg),
			IntentError::Db(e) => e.into(),
		}
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		ApiError::Validation(rejection.body_text())
	}
}
