// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use atrium_server_auth::types::{CompanyId, MalformedIdentifier};
use atrium_server_db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum IntentError {
	#[error("unknown intent: {0:?}")]
	UnknownIntent(String),

	#[error(transparent)]
	MalformedIdentifier(#[from] MalformedIdentifier),

	#[error("company not found: {0}")]
	CompanyNotFound(CompanyId),

	#[error("invalid parameters: {0}")]
	Validation(String),

	#[error(transparent)]
	Db(#[from] DbError),
}

pub type Result<T> = std::result::Result<T, IntentError>;
