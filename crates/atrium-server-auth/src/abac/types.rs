// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Type definitions for company access decisions.
//!
//! - [`CompanyAttrs`]: the ownership facts of the company being accessed
//! - [`Action`]: the operation being performed
//! - [`Decision`]: the outcome, carrying a [`DenyReason`] on denial
//!
//! All attributes are loaded before evaluation; the engine itself never
//! touches storage.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{CompanyId, UserId};

/// Attributes describing the company being accessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyAttrs {
	pub company_id: CompanyId,
	pub owner_id: UserId,
	pub members: Vec<UserId>,
}

impl CompanyAttrs {
	/// Creates attributes for a company with no members.
	pub fn new(company_id: CompanyId, owner_id: UserId) -> Self {
		Self {
			company_id,
			owner_id,
			members: Vec::new(),
		}
	}

	/// Builder: add a member.
	pub fn with_member(mut self, user_id: UserId) -> Self {
		self.members.push(user_id);
		self
	}

	pub fn is_owned_by(&self, user_id: UserId) -> bool {
		self.owner_id == user_id
	}

	pub fn has_member(&self, user_id: UserId) -> bool {
		self.members.contains(&user_id)
	}
}

/// Operations that can be performed on a company or its scoped resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
	ReadCompany,
	UpdateCompany,
	DeleteCompany,
	AddMember,
	RemoveMember,
	ReadScopedResource,
	CreateScopedResource,
	UpdateScopedResource,
	DeleteScopedResource,
}

impl Action {
	/// Actions restricted to the company owner.
	pub fn is_owner_only(&self) -> bool {
		matches!(
			self,
			Action::UpdateCompany | Action::AddMember | Action::RemoveMember
		)
	}

	/// Actions granted to both the owner and members.
	pub fn is_tenant_scoped(&self) -> bool {
		matches!(
			self,
			Action::ReadCompany
				| Action::ReadScopedResource
				| Action::CreateScopedResource
				| Action::UpdateScopedResource
				| Action::DeleteScopedResource
		)
	}
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
	/// The principal's role cannot perform this action at all.
	InsufficientRole,
	/// Only the company owner may perform this action.
	NotOwner,
	/// The principal neither owns nor belongs to the company.
	NotMember,
}

impl fmt::Display for DenyReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DenyReason::InsufficientRole => write!(f, "insufficient role"),
			DenyReason::NotOwner => write!(f, "only the company owner may do this"),
			DenyReason::NotMember => write!(f, "not a member of this company"),
		}
	}
}

/// Outcome of an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
	Allow,
	Deny(DenyReason),
}

impl Decision {
	pub fn is_allowed(&self) -> bool {
		matches!(self, Decision::Allow)
	}

	/// Converts the decision into a `Result`, yielding the deny reason on failure.
	pub fn into_result(self) -> Result<(), DenyReason> {
		match self {
			Decision::Allow => Ok(()),
			Decision::Deny(reason) => Err(reason),
		}
	}
}
