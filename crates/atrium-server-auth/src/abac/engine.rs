// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Company access decision engine.
//!
//! [`decide`] evaluates an ordered rule list and returns on the first rule
//! that matches:
//!
//! 1. **SUPERADMIN** is allowed everything, including deletion
//! 2. **Delete gate**: deleting a company requires ADMIN; an ADMIN passing the
//!    gate is allowed
//! 3. **Owner-only**: updating the company and managing membership require
//!    the caller to be the owner
//! 4. **Owner**: the owner may read the company and read/write its resources
//! 5. **Member**: members get the same tenant-scoped access as the owner
//! 6. Everything else is denied
//!
//! The decision is a pure function of the principal, the company's ownership
//! attributes and the action.

use super::types::{Action, CompanyAttrs, Decision, DenyReason};
use crate::principal::Principal;
use crate::types::Role;
use tracing::instrument;

/// Decides whether `principal` may perform `action` on `company`.
///
/// # Tracing
///
/// Instrumented at debug level with the subject, role, company and action.
/// Denials are additionally logged at info level.
#[instrument(
    level = "debug",
    skip(principal, company),
    fields(
        subject_id = %principal.subject_id,
        role = %principal.role,
        company_id = %company.company_id,
        action = ?action,
    )
)]
pub fn decide(principal: &Principal, company: &CompanyAttrs, action: Action) -> Decision {
	let decision = evaluate(principal, company, action);
	if let Decision::Deny(reason) = decision {
		tracing::info!(
			subject_id = %principal.subject_id,
			company_id = %company.company_id,
			action = ?action,
			%reason,
			"access denied"
		);
	}
	decision
}

/// Convenience wrapper returning true when [`decide`] allows.
pub fn is_allowed(principal: &Principal, company: &CompanyAttrs, action: Action) -> bool {
	decide(principal, company, action).is_allowed()
}

fn evaluate(principal: &Principal, company: &CompanyAttrs, action: Action) -> Decision {
	if principal.role == Role::SuperAdmin {
		return Decision::Allow;
	}

	if action == Action::DeleteCompany {
		return if principal.role.may_delete_companies() {
			Decision::Allow
		} else {
			Decision::Deny(DenyReason::InsufficientRole)
		};
	}

	let is_owner = company.is_owned_by(principal.subject_id);

	if action.is_owner_only() {
		return if is_owner {
			Decision::Allow
		} else {
			Decision::Deny(DenyReason::NotOwner)
		};
	}

	if action.is_tenant_scoped() {
		if is_owner || company.has_member(principal.subject_id) {
			return Decision::Allow;
		}
		return Decision::Deny(DenyReason::NotMember);
	}

	Decision::Deny(DenyReason::NotMember)
}
