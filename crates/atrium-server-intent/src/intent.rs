// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Canonical intents and the alias table that maps free-text names onto them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CanonicalIntent {
	GetProducts,
	GetProductDetails,
	GetProjects,
	GetOffers,
	GetCompanyInfo,
	SearchProducts,
}

impl CanonicalIntent {
	pub fn all() -> &'static [CanonicalIntent] {
		&[
			CanonicalIntent::GetProducts,
			CanonicalIntent::GetProductDetails,
			CanonicalIntent::GetProjects,
			CanonicalIntent::GetOffers,
			CanonicalIntent::GetCompanyInfo,
			CanonicalIntent::SearchProducts,
		]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			CanonicalIntent::GetProducts => "GET_PRODUCTS",
			CanonicalIntent::GetProductDetails => "GET_PRODUCT_DETAILS",
			CanonicalIntent::GetProjects => "GET_PROJECTS",
			CanonicalIntent::GetOffers => "GET_OFFERS",
			CanonicalIntent::GetCompanyInfo => "GET_COMPANY_INFO",
			CanonicalIntent::SearchProducts => "SEARCH_PRODUCTS",
		}
	}
}

impl fmt::Display for CanonicalIntent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

static ALIASES: LazyLock<HashMap<&'static str, CanonicalIntent>> = LazyLock::new(|| {
	use CanonicalIntent::*;
	HashMap::from([
		("get_products", GetProducts),
		("list_products", GetProducts),
		("show_products", GetProducts),
		("get_product_details", GetProductDetails),
		("product_info", GetProductDetails),
		("get_projects", GetProjects),
		("list_projects", GetProjects),
		("get_offers", GetOffers),
		("list_offers", GetOffers),
		("show_deals", GetOffers),
		("get_company_info", GetCompanyInfo),
		("company_details", GetCompanyInfo),
		("search_products", SearchProducts),
	])
});

/// Resolves a raw intent name. Matching is case-insensitive and ignores
/// surrounding whitespace.
pub fn resolve_intent(raw: &str) -> Option<CanonicalIntent> {
	let normalized = raw.trim().to_lowercase();
	ALIASES.get(normalized.as_str()).copied()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn synonyms_collapse_to_one_tag() {
		for alias in ["get_products", "list_products", "show_products"] {
			assert_eq!(resolve_intent(alias), Some(CanonicalIntent::GetProducts));
		}
		assert_eq!(resolve_intent("show_deals"), Some(CanonicalIntent::GetOffers));
		assert_eq!(resolve_intent("product_info"), Some(CanonicalIntent::GetProductDetails));
		assert_eq!(resolve_intent("company_details"), Some(CanonicalIntent::GetCompanyInfo));
	}

	#[test]
	fn matching_ignores_case_and_whitespace() {
		assert_eq!(resolve_intent("  List_Products "), Some(CanonicalIntent::GetProducts));
		assert_eq!(resolve_intent("SEARCH_PRODUCTS"), Some(CanonicalIntent::SearchProducts));
	}

	#[test]
	fn unknown_names_do_not_resolve() {
		assert_eq!(resolve_intent("foo_bar"), None);
		assert_eq!(resolve_intent(""), None);
		assert_eq!(resolve_intent("get products"), None);
	}

	#[test]
	fn every_tag_is_reachable() {
		for tag in CanonicalIntent::all() {
			assert!(ALIASES.values().any(|t| t == tag), "{tag} has no alias");
		}
	}

	proptest! {
		#[test]
		fn resolution_is_case_insensitive(alias in proptest::sample::select(ALIASES.keys().copied().collect::<Vec<_>>())) {
			prop_assert_eq!(resolve_intent(&alias.to_uppercase()), resolve_intent(alias));
		}
	}
}
