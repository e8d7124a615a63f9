// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tenancy and authorization for Atrium.
//!
//! This crate owns the identifiers and the [`Company`] tenant model, the
//! verified [`Principal`] produced for every authenticated request, and the
//! access decision engine in [`abac`].

pub mod abac;
pub mod company;
pub mod principal;
pub mod types;

pub use abac::{decide, is_allowed, listing_scope, Action, CompanyAttrs, Decision, DenyReason, ListingScope};
pub use company::Company;
pub use principal::{
	extract_bearer_token, hash_token, AuthenticationRequired, Principal, PrincipalResolver,
	StaticTokenResolver,
};
pub use types::{CompanyId, MalformedIdentifier, OfferId, ProductId, ProjectId, Role, UnknownRole, UserId};
