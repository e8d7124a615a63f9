// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use atrium_server_auth::{Action, CompanyId, Principal};
use atrium_server_db::CompanyStore;
use atrium_server_view::{CacheCoherenceManager, DerivedView, DerivedViewBuilder};

use super::authorize;
use crate::error::ApiError;

#[derive(Clone)]
pub struct ViewService {
	companies: Arc<dyn CompanyStore>,
	coherence: Arc<CacheCoherenceManager>,
	builder: Arc<DerivedViewBuilder>,
}

impl ViewService {
	pub fn new(
		companies: Arc<dyn CompanyStore>,
		coherence: Arc<CacheCoherenceManager>,
		builder: Arc<DerivedViewBuilder>,
	) -> Self {
		Self {
			companies,
			coherence,
			builder,
		}
	}

	/// The company's view, served from cache when present.
	pub async fn view(&self, principal: &Principal, company_id: &CompanyId) -> Result<DerivedView, ApiError> {
		authorize(self.companies.as_ref(), principal, company_id, Action::ReadScopedResource).await?;
		Ok(self.coherence.view_or_build(company_id, &self.builder).await?)
	}

	/// A freshly built view. Neither reads nor writes the cache.
	pub async fn preview(&self, principal: &Principal, company_id: &CompanyId) -> Result<DerivedView, ApiError> {
		authorize(self.companies.as_ref(), principal, company_id, Action::ReadScopedResource).await?;
		Ok(self.builder.build(company_id).await?)
	}
}
