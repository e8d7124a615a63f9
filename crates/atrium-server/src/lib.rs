// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Atrium HTTP server.
//!
//! Serves authenticated, tenant-scoped CRUD over companies and their
//! products, projects and offers, a cached derived view per company, and the
//! public intent endpoint.

pub mod api;
pub mod auth_middleware;
pub mod error;
pub mod routes;
pub mod services;
pub mod validation;

pub use api::{create_app_state, create_app_state_with_resolver, create_router, AppState};
pub use atrium_server_config::ServerConfig;
pub use error::{ApiError, ErrorResponse};
