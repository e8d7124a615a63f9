// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access policy switches.

use serde::Deserialize;

#[derive(Debug, Clone, Default)]
pub struct AccessConfig {
	/// When set, company listings for regular users also include companies
	/// they are a member of, not only the ones they own.
	pub list_includes_memberships: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfigLayer {
	#[serde(default)]
	pub list_includes_memberships: Option<bool>,
}

impl AccessConfigLayer {
	pub fn merge(&mut self, other: AccessConfigLayer) {
		if other.list_includes_memberships.is_some() {
			self.list_includes_memberships = other.list_includes_memberships;
		}
	}

	pub fn finalize(self) -> AccessConfig {
		AccessConfig {
			list_includes_memberships: self.list_includes_memberships.unwrap_or(false),
		}
	}
}
