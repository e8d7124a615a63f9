// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bearer token grants.
//!
//! Tokens are configured by SHA-256 digest only, and only through the TOML
//! file:
//!
//! ```toml
//! [[auth.tokens]]
//! token_sha256 = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
//! subject_id = "0b4e7a0e-5b8f-4c1f-9b8a-3a1f8f0d2c11"
//! role = "SUPERADMIN"
//! ```

use atrium_server_auth::{Principal, Role, UserId};
use serde::Deserialize;

use crate::error::ConfigError;

const SHA256_HEX_LEN: usize = 64;

/// A resolved token grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
	/// Lowercase hex digest.
	pub token_sha256: String,
	pub subject_id: UserId,
	pub role: Role,
}

impl TokenGrant {
	pub fn principal(&self) -> Principal {
		Principal::new(self.subject_id, self.role)
	}
}

#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
	pub tokens: Vec<TokenGrant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrantLayer {
	pub token_sha256: String,
	pub subject_id: String,
	pub role: String,
}

impl TokenGrantLayer {
	fn finalize(self, index: usize) -> Result<TokenGrant, ConfigError> {
		let key = |field: &str| format!("auth.tokens[{index}].{field}");

		let digest = self.token_sha256.trim().to_ascii_lowercase();
		if digest.len() != SHA256_HEX_LEN || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(ConfigError::InvalidValue {
				key: key("token_sha256"),
				message: "expected 64 hex characters".to_string(),
			});
		}

		let subject_id = UserId::parse(self.subject_id.trim()).map_err(|e| ConfigError::InvalidValue {
			key: key("subject_id"),
			message: e.to_string(),
		})?;

		let role = self.role.parse::<Role>().map_err(|e| ConfigError::InvalidValue {
			key: key("role"),
			message: e.to_string(),
		})?;

		Ok(TokenGrant {
			token_sha256: digest,
			subject_id,
			role,
		})
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub tokens: Option<Vec<TokenGrantLayer>>,
}

impl AuthConfigLayer {
	/// A later layer that lists tokens replaces the earlier list entirely.
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.tokens.is_some() {
			self.tokens = other.tokens;
		}
	}

	pub fn finalize(self) -> Result<AuthConfig, ConfigError> {
		let tokens = self
			.tokens
			.unwrap_or_default()
			.into_iter()
			.enumerate()
			.map(|(index, grant)| grant.finalize(index))
			.collect::<Result<Vec<_>, _>>()?;

		Ok(AuthConfig { tokens })
	}
}
