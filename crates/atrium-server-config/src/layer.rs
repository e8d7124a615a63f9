// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration produced by a single source.

use serde::Deserialize;

use crate::sections::{
	AccessConfigLayer, AuthConfigLayer, CacheConfigLayer, DatabaseConfigLayer, HttpConfigLayer,
	LoggingConfigLayer,
};

/// One configuration layer. `None` sections contribute nothing on merge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub cache: Option<CacheConfigLayer>,
	#[serde(default)]
	pub access: Option<AccessConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
	#[serde(default)]
	pub auth: Option<AuthConfigLayer>,
}

macro_rules! merge_section {
	($self:ident, $other:ident, $field:ident) => {
		match (&mut $self.$field, $other.$field) {
			(Some(current), Some(incoming)) => current.merge(incoming),
			(None, Some(incoming)) => $self.$field = Some(incoming),
			(_, None) => {}
		}
	};
}

impl ServerConfigLayer {
	/// Merge `other` over `self`. Fields set in `other` win.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_section!(self, other, http);
		merge_section!(self, other, database);
		merge_section!(self, other, cache);
		merge_section!(self, other, access);
		merge_section!(self, other, logging);
		merge_section!(self, other, auth);
	}
}
