// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router.

use std::sync::Arc;

use atrium_server_auth::{PrincipalResolver, StaticTokenResolver};
use atrium_server_config::ServerConfig;
use atrium_server_db::{CatalogRepository, CatalogStore, CompanyRepository, CompanyStore};
use atrium_server_intent::IntentRouter;
use atrium_server_view::{CacheCoherenceManager, DerivedViewBuilder, MokaViewCache};
use axum::{
	middleware::from_fn_with_state,
	routing::{delete, get, post},
	Router,
};
use sqlx::SqlitePool;

use crate::auth_middleware::auth_layer;
use crate::routes;
use crate::services::{CatalogService, CompanyService, ViewService};

#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub resolver: Arc<dyn PrincipalResolver>,
	pub coherence: Arc<CacheCoherenceManager>,
	pub companies: CompanyService,
	pub catalog: CatalogService,
	pub views: ViewService,
	pub intents: Arc<IntentRouter>,
}

/// Wires repositories, cache and services from `config`. Bearer tokens are
/// resolved against `config.auth.tokens`.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let resolver = config
		.auth
		.tokens
		.iter()
		.fold(StaticTokenResolver::new(), |resolver, grant| {
			resolver.with_digest(grant.token_sha256.clone(), grant.principal())
		});
	create_app_state_with_resolver(pool, config, Arc::new(resolver))
}

pub fn create_app_state_with_resolver(
	pool: SqlitePool,
	config: &ServerConfig,
	resolver: Arc<dyn PrincipalResolver>,
) -> AppState {
	let companies: Arc<dyn CompanyStore> = Arc::new(CompanyRepository::new(pool.clone()));
	let catalog: Arc<dyn CatalogStore> = Arc::new(CatalogRepository::new(pool.clone()));

	let cache = Arc::new(MokaViewCache::new(config.cache.max_entries));
	let coherence = Arc::new(
		CacheCoherenceManager::new(cache)
			.with_ttl(config.cache.ttl())
			.with_fencing(config.cache.fence_writes),
	);
	let builder = Arc::new(DerivedViewBuilder::new(Arc::clone(&companies), Arc::clone(&catalog)));

	AppState {
		pool,
		resolver,
		coherence: Arc::clone(&coherence),
		companies: CompanyService::new(
			Arc::clone(&companies),
			Arc::clone(&coherence),
			config.access.list_includes_memberships,
		),
		catalog: CatalogService::new(Arc::clone(&companies), Arc::clone(&catalog), Arc::clone(&coherence)),
		views: ViewService::new(Arc::clone(&companies), Arc::clone(&coherence), builder),
		intents: Arc::new(IntentRouter::new(companies, catalog)),
	}
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		// Public
		.route("/health", get(routes::health::health_check))
		.route("/api/intents", post(routes::intents::handle_intent))
		// Companies
		.route(
			"/api/companies",
			get(routes::companies::list_companies).post(routes::companies::create_company),
		)
		.route(
			"/api/companies/{id}",
			get(routes::companies::get_company)
				.patch(routes::companies::update_company)
				.delete(routes::companies::delete_company),
		)
		// Membership
		.route("/api/companies/{id}/members", post(routes::members::add_member))
		.route(
			"/api/companies/{id}/members/{user_id}",
			delete(routes::members::remove_member),
		)
		// Derived view
		.route("/api/companies/{id}/view", get(routes::view::get_view))
		.route("/api/companies/{id}/view/preview", get(routes::view::preview_view))
		// Scoped resources
		.route(
			"/api/companies/{id}/{kind}",
			get(routes::resources::list_resources).post(routes::resources::create_resource),
		)
		.route(
			"/api/companies/{id}/{kind}/{resource_id}",
			get(routes::resources::get_resource)
				.patch(routes::resources::update_resource)
				.delete(routes::resources::delete_resource),
		)
		.layer(from_fn_with_state(state.clone(), auth_layer))
		.with_state(state)
}
