// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::support::{body_json, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn company_routes_enforce_roles() {
	run_authz_cases(|f| {
		let acme = format!("/api/companies/{}", f.acme.id);
		vec![
			AuthzCase {
				name: "anonymous cannot read",
				method: Method::GET,
				path: acme.clone(),
				user: None,
				body: None,
				expected_status: StatusCode::UNAUTHORIZED,
			},
			AuthzCase {
				name: "owner reads",
				method: Method::GET,
				path: acme.clone(),
				user: Some(f.alice.clone()),
				body: None,
				expected_status: StatusCode::OK,
			},
			AuthzCase {
				name: "member reads",
				method: Method::GET,
				path: acme.clone(),
				user: Some(f.carol.clone()),
				body: None,
				expected_status: StatusCode::OK,
			},
			AuthzCase {
				name: "outsider cannot read",
				method: Method::GET,
				path: acme.clone(),
				user: Some(f.bob.clone()),
				body: None,
				expected_status: StatusCode::FORBIDDEN,
			},
			AuthzCase {
				name: "admin without membership cannot read",
				method: Method::GET,
				path: acme.clone(),
				user: Some(f.admin.clone()),
				body: None,
				expected_status: StatusCode::FORBIDDEN,
			},
			AuthzCase {
				name: "superadmin reads",
				method: Method::GET,
				path: acme.clone(),
				user: Some(f.root.clone()),
				body: None,
				expected_status: StatusCode::OK,
			},
			AuthzCase {
				name: "owner updates",
				method: Method::PATCH,
				path: acme.clone(),
				user: Some(f.alice.clone()),
				body: Some(json!({ "phone_number": "+1 555 0199" })),
				expected_status: StatusCode::OK,
			},
			AuthzCase {
				name: "member cannot update",
				method: Method::PATCH,
				path: acme.clone(),
				user: Some(f.carol.clone()),
				body: Some(json!({ "name": "Carol Corp" })),
				expected_status: StatusCode::FORBIDDEN,
			},
			AuthzCase {
				name: "owner with USER role cannot delete",
				method: Method::DELETE,
				path: acme.clone(),
				user: Some(f.alice.clone()),
				body: None,
				expected_status: StatusCode::FORBIDDEN,
			},
			AuthzCase {
				name: "admin deletes",
				method: Method::DELETE,
				path: acme.clone(),
				user: Some(f.admin.clone()),
				body: None,
				expected_status: StatusCode::NO_CONTENT,
			},
			AuthzCase {
				name: "superadmin deletes",
				method: Method::DELETE,
				path: acme,
				user: Some(f.root.clone()),
				body: None,
				expected_status: StatusCode::NO_CONTENT,
			},
		]
	})
	.await;
}

#[tokio::test]
async fn malformed_company_id_is_bad_request() {
	let app = TestApp::new().await;
	let response = app.get("/api/companies/not-a-uuid", Some(&app.fixtures.alice)).await;

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	let body = body_json(response).await;
	assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn missing_company_is_not_found_before_authorization() {
	let app = TestApp::new().await;
	let path = format!("/api/companies/{}", atrium_server_auth::CompanyId::generate());

	// bob would be denied on an existing company; a missing one is still 404
	let response = app.get(&path, Some(&app.fixtures.bob)).await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert_eq!(body_json(response).await["error"], "not_found");
}

#[tokio::test]
async fn unknown_token_is_unauthorized() {
	let app = TestApp::new().await;
	let mut stranger = app.fixtures.alice.clone();
	stranger.token = "not-a-real-token".to_string();

	let response = app.get("/api/companies", Some(&stranger)).await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(body_json(response).await["error"], "unauthorized");
}

#[tokio::test]
async fn create_company_sets_caller_as_owner() {
	let app = TestApp::new().await;
	let response = app
		.post(
			"/api/companies",
			Some(&app.fixtures.bob),
			json!({ "name": "Initech", "website_url": "https://initech.example" }),
		)
		.await;

	assert_eq!(response.status(), StatusCode::CREATED);
	let body = body_json(response).await;
	assert_eq!(body["name"], "Initech");
	assert_eq!(body["owner_id"], app.fixtures.bob.id().to_string());
	assert_eq!(body["members"], json!([]));
}

#[tokio::test]
async fn create_company_requires_a_name() {
	let app = TestApp::new().await;

	let response = app.post("/api/companies", Some(&app.fixtures.bob), json!({ "name": "  " })).await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await["error"], "validation_failed");

	let response = app.post("/api/companies", Some(&app.fixtures.bob), json!({})).await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_company_name_conflicts() {
	let app = TestApp::new().await;
	let response = app.post("/api/companies", Some(&app.fixtures.bob), json!({ "name": "Acme" })).await;

	assert_eq!(response.status(), StatusCode::CONFLICT);
	assert_eq!(body_json(response).await["error"], "conflict");
}

#[tokio::test]
async fn non_object_body_is_bad_request() {
	let app = TestApp::new().await;
	let response = app
		.post("/api/companies", Some(&app.fixtures.bob), json!(["Initech"]))
		.await;

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await["error"], "validation_failed");
}

mod listing {
	use super::*;

	async fn listed_names(app: &TestApp, user: &crate::support::TestUser) -> Vec<String> {
		let response = app.get("/api/companies", Some(user)).await;
		assert_eq!(response.status(), StatusCode::OK);
		let body = body_json(response).await;
		assert_eq!(body["total"], body["companies"].as_array().unwrap().len());

		let mut names: Vec<String> = body["companies"]
			.as_array()
			.unwrap()
			.iter()
			.map(|c| c["name"].as_str().unwrap().to_string())
			.collect();
		names.sort();
		names
	}

	#[tokio::test]
	async fn superadmin_sees_every_company() {
		let app = TestApp::new().await;
		assert_eq!(listed_names(&app, &app.fixtures.root).await, vec!["Acme", "Globex"]);
	}

	#[tokio::test]
	async fn users_see_only_owned_companies() {
		let app = TestApp::new().await;
		assert_eq!(listed_names(&app, &app.fixtures.alice).await, vec!["Acme"]);
		assert_eq!(listed_names(&app, &app.fixtures.bob).await, vec!["Globex"]);
		assert!(listed_names(&app, &app.fixtures.carol).await.is_empty());
		assert!(listed_names(&app, &app.fixtures.admin).await.is_empty());
	}

	#[tokio::test]
	async fn memberships_are_listed_when_enabled() {
		let app = TestApp::with_config(|config| config.access.list_includes_memberships = true).await;
		assert_eq!(listed_names(&app, &app.fixtures.carol).await, vec!["Acme"]);
	}
}
