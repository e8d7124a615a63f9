// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use atrium_server_auth::types::CompanyId;
use atrium_server_db::DbError;

/// Failure reported by a [`ViewCache`](crate::cache::ViewCache) backend.
#[derive(Debug, thiserror::Error)]
#[error("view cache error: {0}")]
pub struct CacheError(pub String);

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
	#[error("company not found: {0}")]
	NotFound(CompanyId),

	#[error(transparent)]
	Db(#[from] DbError),
}

pub type Result<T> = std::result::Result<T, ViewError>;
