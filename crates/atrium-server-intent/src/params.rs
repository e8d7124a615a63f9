// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loosely typed intent parameters.

use serde_json::{Map, Value};

use crate::error::IntentError;

/// Default cap on the number of products listed.
pub const DEFAULT_PRODUCT_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntentParameters(Map<String, Value>);

impl IntentParameters {
	/// Accepts a JSON object or null/absent. Any other JSON type is rejected.
	pub fn from_json(value: Option<Value>) -> Result<Self, IntentError> {
		match value {
			None | Some(Value::Null) => Ok(Self::default()),
			Some(Value::Object(map)) => Ok(Self(map)),
			Some(_) => Err(IntentError::Validation("parameters must be an object".to_string())),
		}
	}

	/// `limit` as a positive integer, given as a number or numeric string.
	pub fn limit(&self) -> Result<usize, IntentError> {
		let invalid = || IntentError::Validation("limit must be a positive integer".to_string());

		let limit = match self.0.get("limit") {
			None | Some(Value::Null) => return Ok(DEFAULT_PRODUCT_LIMIT),
			Some(Value::Number(n)) => n.as_u64().ok_or_else(invalid)?,
			Some(Value::String(s)) => s.trim().parse::<u64>().map_err(|_| invalid())?,
			Some(_) => return Err(invalid()),
		};

		match usize::try_from(limit) {
			Ok(limit) if limit > 0 => Ok(limit),
			_ => Err(invalid()),
		}
	}

	/// First non-blank string among `keys`, trimmed.
	pub fn text(&self, keys: &[&str]) -> Option<String> {
		keys
			.iter()
			.filter_map(|key| self.0.get(*key).and_then(Value::as_str))
			.map(str::trim)
			.find(|s| !s.is_empty())
			.map(str::to_string)
	}

	/// Like [`text`](Self::text) but required.
	pub fn require_text(&self, keys: &[&str]) -> Result<String, IntentError> {
		self
			.text(keys)
			.ok_or_else(|| IntentError::Validation(format!("{} is required", keys.join(" or "))))
	}
}
