// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for tenancy and authorization.
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs for each entity kind
//!   ([`UserId`], [`CompanyId`], [`ProductId`], ...) preventing accidental mixing
//! - **Roles**: the three platform-wide roles a principal can hold ([`Role`])
//!
//! All ID types serialize transparently as UUID strings. Parsing a string that
//! is not a UUID fails with [`MalformedIdentifier`], which callers report as a
//! 400 rather than a 404.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

/// A string could not be parsed as an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed {kind} identifier: {value:?}")]
pub struct MalformedIdentifier {
	pub kind: &'static str,
	pub value: String,
}

macro_rules! define_id_type {
	($name:ident, $kind:literal, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}

			/// Parse an identifier from its string form.
			pub fn parse(value: &str) -> Result<Self, MalformedIdentifier> {
				Uuid::parse_str(value.trim())
					.map(Self)
					.map_err(|_| MalformedIdentifier {
						kind: $kind,
						value: value.to_string(),
					})
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl FromStr for $name {
			type Err = MalformedIdentifier;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::parse(s)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "user", "Unique identifier for a user (a principal's subject).");
define_id_type!(CompanyId, "company", "Unique identifier for a company (a tenant).");
define_id_type!(ProductId, "product", "Unique identifier for a product.");
define_id_type!(ProjectId, "project", "Unique identifier for a project.");
define_id_type!(OfferId, "offer", "Unique identifier for an offer.");

// =============================================================================
// Roles
// =============================================================================

/// Platform-wide role carried by every principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
	/// Regular account. Access is limited to owned and joined companies.
	User,
	/// May delete companies; otherwise treated like a user.
	Admin,
	/// Unconditional access to every company.
	#[serde(rename = "SUPERADMIN", alias = "SUPER_ADMIN")]
	SuperAdmin,
}

impl Role {
	/// Returns all available roles.
	pub fn all() -> &'static [Role] {
		&[Role::User, Role::Admin, Role::SuperAdmin]
	}

	/// Returns true for roles allowed through the company deletion gate.
	pub fn may_delete_companies(&self) -> bool {
		matches!(self, Role::Admin | Role::SuperAdmin)
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::User => write!(f, "USER"),
			Role::Admin => write!(f, "ADMIN"),
			Role::SuperAdmin => write!(f, "SUPERADMIN"),
		}
	}
}

/// Error returned when a role string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
	type Err = UnknownRole;

	/// Accepts `USER`, `ADMIN`, `SUPERADMIN` (or `SUPER_ADMIN`), case-insensitive.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_uppercase().as_str() {
			"USER" => Ok(Role::User),
			"ADMIN" => Ok(Role::Admin),
			"SUPERADMIN" | "SUPER_ADMIN" => Ok(Role::SuperAdmin),
			_ => Err(UnknownRole(s.to_string())),
		}
	}
}
