// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Attribute-based access control for companies and their scoped resources.

pub mod engine;
pub mod listing;
pub mod types;

pub use engine::{decide, is_allowed};
pub use listing::{listing_scope, ListingScope};
pub use types::{Action, CompanyAttrs, Decision, DenyReason};
