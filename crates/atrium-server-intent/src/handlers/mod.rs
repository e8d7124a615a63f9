// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-intent handlers.
//!
//! Each handler receives the already-resolved company and the request
//! parameters and produces the response payload and message.

mod company;
mod offers;
mod products;
mod projects;

use async_trait::async_trait;
use atrium_server_auth::company::Company;
use atrium_server_db::CatalogStore;
use serde_json::Value;

use crate::error::IntentError;
use crate::params::IntentParameters;

pub use company::GetCompanyInfo;
pub use offers::GetOffers;
pub use products::{GetProductDetails, GetProducts, SearchProducts};
pub use projects::GetProjects;

/// Inputs shared by every handler.
pub struct IntentContext<'a> {
	pub company: &'a Company,
	pub params: &'a IntentParameters,
	pub catalog: &'a dyn CatalogStore,
}

/// Payload and human-readable message produced by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerOutput {
	pub data: Value,
	pub message: String,
}

#[async_trait]
pub trait IntentHandler: Send + Sync {
	async fn handle(&self, ctx: &IntentContext<'_>) -> Result<HandlerOutput, IntentError>;
}
