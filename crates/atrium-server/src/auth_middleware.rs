// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication middleware for Axum.
//!
//! [`auth_layer`] resolves the request's bearer token through the configured
//! [`PrincipalResolver`](atrium_server_auth::PrincipalResolver) and stores an
//! [`AuthContext`] in the request extensions. Handlers that need a caller take
//! the [`RequireAuth`] extractor:
//!
//! ```ignore
//! async fn protected_handler(RequireAuth(principal): RequireAuth) -> impl IntoResponse {
//!     format!("Hello, {}!", principal.subject_id)
//! }
//! ```
//!
//! Token values are never logged.

use atrium_server_auth::Principal;
use axum::{
	extract::{FromRequestParts, Request, State},
	http::request::Parts,
	middleware::Next,
	response::Response,
};
use tracing::instrument;

use crate::{api::AppState, error::ApiError};

/// Authentication state attached to every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthContext {
	pub principal: Option<Principal>,
}

/// Resolves the caller and attaches an [`AuthContext`]. Never rejects; public
/// routes simply ignore the context.
pub async fn auth_layer(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
	let principal = state.resolver.resolve(request.headers()).await.ok();
	request.extensions_mut().insert(AuthContext { principal });
	next.run(request).await
}

/// Extractor that requires an authenticated principal. Rejects with 401.
pub struct RequireAuth(pub Principal);

impl<S> FromRequestParts<S> for RequireAuth
where
	S: Send + Sync,
{
	type Rejection = ApiError;

	#[instrument(name = "RequireAuth::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let ctx = parts
			.extensions
			.get::<AuthContext>()
			.copied()
			.unwrap_or_default();

		match ctx.principal {
			Some(principal) => {
				tracing::debug!(subject_id = %principal.subject_id, role = %principal.role, "authenticated");
				Ok(RequireAuth(principal))
			}
			None => {
				tracing::debug!("authentication required: no valid credentials");
				Err(ApiError::Unauthorized)
			}
		}
	}
}
