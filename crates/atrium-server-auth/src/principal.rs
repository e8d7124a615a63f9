// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Principal resolution from request credentials.
//!
//! Credential verification is delegated to a [`PrincipalResolver`]. Whatever
//! scheme it implements, it produces a verified [`Principal`] or fails with
//! [`AuthenticationRequired`] before any access decision is made.
//!
//! [`StaticTokenResolver`] is the shipped implementation: it maps bearer
//! tokens to configured principals by SHA-256 digest, so plaintext tokens
//! never appear in configuration.
//!
//! # Security Notes
//!
//! - Bearer tokens are extracted from the Authorization header
//! - Token values are never logged, only the resolved subject

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::instrument;

use crate::types::{Role, UserId};

/// An authenticated actor. Immutable for the lifetime of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	pub subject_id: UserId,
	pub role: Role,
}

impl Principal {
	pub fn new(subject_id: UserId, role: Role) -> Self {
		Self { subject_id, role }
	}

	pub fn user(subject_id: UserId) -> Self {
		Self::new(subject_id, Role::User)
	}

	pub fn is_super_admin(&self) -> bool {
		self.role == Role::SuperAdmin
	}
}

/// Error returned when a request carries no valid credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("authentication required")]
pub struct AuthenticationRequired;

/// Verifies request credentials and yields the principal behind them.
#[async_trait]
pub trait PrincipalResolver: Send + Sync {
	async fn resolve(&self, headers: &HeaderMap) -> Result<Principal, AuthenticationRequired>;
}

/// Extract a bearer token from the Authorization header.
///
/// Expects `Authorization: Bearer <token>`; the scheme is matched
/// case-insensitively.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
	let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
	let (scheme, token) = value.split_once(' ')?;
	if !scheme.eq_ignore_ascii_case("bearer") {
		return None;
	}
	let token = token.trim();
	(!token.is_empty()).then_some(token)
}

/// Hex-encoded SHA-256 digest of a token.
pub fn hash_token(token: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(token.as_bytes());
	hex::encode(hasher.finalize())
}

/// Resolves bearer tokens against a fixed table of token digests.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
	grants: HashMap<String, Principal>,
}

impl StaticTokenResolver {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a principal under the hex SHA-256 digest of its token.
	pub fn with_digest(mut self, token_sha256: impl Into<String>, principal: Principal) -> Self {
		self
			.grants
			.insert(token_sha256.into().to_ascii_lowercase(), principal);
		self
	}

	/// Registers a principal under a plaintext token. Intended for tests.
	pub fn with_token(self, token: &str, principal: Principal) -> Self {
		let digest = hash_token(token);
		self.with_digest(digest, principal)
	}

	pub fn len(&self) -> usize {
		self.grants.len()
	}

	pub fn is_empty(&self) -> bool {
		self.grants.is_empty()
	}
}

#[async_trait]
impl PrincipalResolver for StaticTokenResolver {
	#[instrument(level = "debug", skip_all)]
	async fn resolve(&self, headers: &HeaderMap) -> Result<Principal, AuthenticationRequired> {
		let token = extract_bearer_token(headers).ok_or(AuthenticationRequired)?;
		match self.grants.get(&hash_token(token)) {
			Some(principal) => {
				tracing::debug!(subject_id = %principal.subject_id, role = %principal.role, "principal resolved");
				Ok(*principal)
			}
			None => {
				tracing::debug!("bearer token did not match any grant");
				Err(AuthenticationRequired)
			}
		}
	}
}
