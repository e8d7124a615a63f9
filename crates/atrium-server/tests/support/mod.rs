// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#![allow(dead_code)]

use atrium_server::{
	api::{create_app_state, create_router, AppState},
	services::CreateCompanyRequest,
	ServerConfig,
};
use atrium_server_auth::{hash_token, Company, Principal, Role, UserId};
use atrium_server_config::TokenGrant;
use atrium_server_db::testing::create_test_pool;
use atrium_server_db::ResourceKind;
use axum::{
	body::Body,
	http::{header::AUTHORIZATION, Method, Request, StatusCode},
	response::Response,
	Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Clone)]
pub struct TestUser {
	pub principal: Principal,
	pub token: String,
}

impl TestUser {
	fn new(name: &str, role: Role) -> Self {
		Self {
			principal: Principal::new(UserId::generate(), role),
			token: format!("{name}-token"),
		}
	}

	pub fn id(&self) -> UserId {
		self.principal.subject_id
	}

	fn grant(&self) -> TokenGrant {
		TokenGrant {
			token_sha256: hash_token(&self.token),
			subject_id: self.principal.subject_id,
			role: self.principal.role,
		}
	}
}

/// Users and companies present in every test app.
///
/// - `acme` is owned by `alice`, has `carol` as a member and two products.
/// - `globex` is owned by `bob` and is empty.
/// - `admin` (ADMIN) and `root` (SUPERADMIN) belong to no company.
#[derive(Clone)]
pub struct Fixtures {
	pub alice: TestUser,
	pub bob: TestUser,
	pub carol: TestUser,
	pub admin: TestUser,
	pub root: TestUser,
	pub acme: Company,
	pub globex: Company,
}

pub struct TestApp {
	pub router: Router,
	pub state: AppState,
	pub fixtures: Fixtures,
}

impl TestApp {
	pub async fn new() -> Self {
		Self::with_config(|_| {}).await
	}

	pub async fn with_config(configure: impl FnOnce(&mut ServerConfig)) -> Self {
		let alice = TestUser::new("alice", Role::User);
		let bob = TestUser::new("bob", Role::User);
		let carol = TestUser::new("carol", Role::User);
		let admin = TestUser::new("admin", Role::Admin);
		let root = TestUser::new("root", Role::SuperAdmin);

		let mut config = ServerConfig::default();
		config.auth.tokens = [&alice, &bob, &carol, &admin, &root]
			.iter()
			.map(|u| u.grant())
			.collect();
		configure(&mut config);

		let pool = create_test_pool().await;
		let state = create_app_state(pool, &config);

		let acme = state
			.companies
			.create(
				&alice.principal,
				CreateCompanyRequest {
					name: "Acme".to_string(),
					website_url: Some("https://acme.example".to_string()),
					phone_number: Some("+1 555 0100".to_string()),
				},
			)
			.await
			.unwrap();
		for (name, price) in [("Anvil", 99.5), ("Rocket Skates", 149.0)] {
			state
				.catalog
				.create(
					&alice.principal,
					&acme.id,
					ResourceKind::Product,
					json!({ "name": name, "description": format!("{name} by Acme"), "price": price }),
				)
				.await
				.unwrap();
		}
		let acme = state
			.companies
			.add_member(&alice.principal, &acme.id, &carol.id())
			.await
			.unwrap();

		let globex = state
			.companies
			.create(
				&bob.principal,
				CreateCompanyRequest {
					name: "Globex".to_string(),
					website_url: None,
					phone_number: None,
				},
			)
			.await
			.unwrap();

		let router = create_router(state.clone());

		Self {
			router,
			state,
			fixtures: Fixtures {
				alice,
				bob,
				carol,
				admin,
				root,
				acme,
				globex,
			},
		}
	}

	pub async fn get(&self, path: &str, user: Option<&TestUser>) -> Response<Body> {
		self.request(Method::GET, path, user, Option::<()>::None).await
	}

	pub async fn post(&self, path: &str, user: Option<&TestUser>, body: impl Serialize) -> Response<Body> {
		self.request(Method::POST, path, user, Some(body)).await
	}

	pub async fn patch(&self, path: &str, user: Option<&TestUser>, body: impl Serialize) -> Response<Body> {
		self.request(Method::PATCH, path, user, Some(body)).await
	}

	pub async fn delete(&self, path: &str, user: Option<&TestUser>) -> Response<Body> {
		self.request(Method::DELETE, path, user, Option::<()>::None).await
	}

	async fn request<T: Serialize>(
		&self,
		method: Method,
		path: &str,
		user: Option<&TestUser>,
		body: Option<T>,
	) -> Response<Body> {
		let mut builder = Request::builder().method(method).uri(path);

		if let Some(test_user) = user {
			builder = builder.header(AUTHORIZATION, format!("Bearer {}", test_user.token));
		}

		let request_body = match body {
			Some(b) => {
				builder = builder.header("content-type", "application/json");
				Body::from(serde_json::to_string(&b).unwrap())
			}
			None => Body::empty(),
		};

		let request = builder.body(request_body).unwrap();
		self.router.clone().oneshot(request).await.unwrap()
	}
}

/// Reads a response body as JSON. An empty body reads as `null`.
pub async fn body_json(response: Response<Body>) -> Value {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	if bytes.is_empty() {
		return Value::Null;
	}
	serde_json::from_slice(&bytes).unwrap()
}

pub struct AuthzCase {
	pub name: &'static str,
	pub method: Method,
	pub path: String,
	pub user: Option<TestUser>,
	pub body: Option<Value>,
	pub expected_status: StatusCode,
}

/// Runs each case against a fresh app so mutating cases cannot affect the
/// next one.
pub async fn run_authz_cases(build: impl Fn(&Fixtures) -> Vec<AuthzCase>) {
	let probe = TestApp::new().await;
	let count = build(&probe.fixtures).len();

	for index in 0..count {
		let app = TestApp::new().await;
		let cases = build(&app.fixtures);
		let case = &cases[index];

		let response = match (&case.method, &case.body) {
			(m, Some(body)) if *m == Method::POST => app.post(&case.path, case.user.as_ref(), body.clone()).await,
			(m, Some(body)) if *m == Method::PATCH => app.patch(&case.path, case.user.as_ref(), body.clone()).await,
			(m, _) if *m == Method::DELETE => app.delete(&case.path, case.user.as_ref()).await,
			_ => app.get(&case.path, case.user.as_ref()).await,
		};

		if response.status() != case.expected_status {
			let status = response.status();
			let body = body_json(response).await;
			panic!(
				"Case '{}': {} {} - expected {}, got {}\nResponse body: {}",
				case.name, case.method, case.path, case.expected_status, status, body
			);
		}
	}
}
