// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Company listing filter.
//!
//! Listing is not a per-company decision: the store is asked for the set of
//! companies matching a [`ListingScope`] derived from the principal.

use crate::principal::Principal;
use crate::types::{Role, UserId};

/// Which companies a principal sees when listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingScope {
	/// Every company.
	All,
	/// Companies whose owner is the given user.
	OwnedBy(UserId),
	/// Companies the given user owns or is a member of.
	OwnedOrMemberOf(UserId),
}

/// Derives the listing scope for `principal`.
///
/// SUPERADMIN sees everything. Other roles see the companies they own, widened
/// to joined companies only when `include_memberships` is set.
pub fn listing_scope(principal: &Principal, include_memberships: bool) -> ListingScope {
	match principal.role {
		Role::SuperAdmin => ListingScope::All,
		Role::User | Role::Admin if include_memberships => {
			ListingScope::OwnedOrMemberOf(principal.subject_id)
		}
		Role::User | Role::Admin => ListingScope::OwnedBy(principal.subject_id),
	}
}
