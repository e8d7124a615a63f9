// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::support::{body_json, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn only_owner_or_superadmin_manage_members() {
	run_authz_cases(|f| {
		let members = format!("/api/companies/{}/members", f.acme.id);
		let carol = format!("{members}/{}", f.carol.id());
		vec![
			AuthzCase {
				name: "owner adds",
				method: Method::POST,
				path: members.clone(),
				user: Some(f.alice.clone()),
				body: Some(json!({ "user_id": f.bob.id().to_string() })),
				expected_status: StatusCode::OK,
			},
			AuthzCase {
				name: "member cannot add",
				method: Method::POST,
				path: members.clone(),
				user: Some(f.carol.clone()),
				body: Some(json!({ "user_id": f.bob.id().to_string() })),
				expected_status: StatusCode::FORBIDDEN,
			},
			AuthzCase {
				name: "admin cannot add",
				method: Method::POST,
				path: members.clone(),
				user: Some(f.admin.clone()),
				body: Some(json!({ "user_id": f.bob.id().to_string() })),
				expected_status: StatusCode::FORBIDDEN,
			},
			AuthzCase {
				name: "superadmin adds",
				method: Method::POST,
				path: members,
				user: Some(f.root.clone()),
				body: Some(json!({ "user_id": f.bob.id().to_string() })),
				expected_status: StatusCode::OK,
			},
			AuthzCase {
				name: "owner removes",
				method: Method::DELETE,
				path: carol.clone(),
				user: Some(f.alice.clone()),
				body: None,
				expected_status: StatusCode::OK,
			},
			AuthzCase {
				name: "member cannot remove",
				method: Method::DELETE,
				path: carol,
				user: Some(f.carol.clone()),
				body: None,
				expected_status: StatusCode::FORBIDDEN,
			},
		]
	})
	.await;
}

#[tokio::test]
async fn added_member_gains_read_access() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let products = format!("/api/companies/{}/products", f.acme.id);

	let response = app.get(&products, Some(&f.bob)).await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
	assert_eq!(body_json(response).await["error"], "forbidden");

	let response = app
		.post(
			&format!("/api/companies/{}/members", f.acme.id),
			Some(&f.alice),
			json!({ "user_id": f.bob.id().to_string() }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let company = body_json(response).await;
	assert!(company["members"]
		.as_array()
		.unwrap()
		.contains(&json!(f.bob.id().to_string())));

	let response = app.get(&products, Some(&f.bob)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await;
	assert_eq!(body["total"], 2);
	assert_eq!(body["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn removed_member_loses_access() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.delete(&format!("/api/companies/{}/members/{}", f.acme.id, f.carol.id()), Some(&f.alice))
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let response = app.get(&format!("/api/companies/{}", f.acme.id), Some(&f.carol)).await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn adding_a_member_twice_is_idempotent() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/companies/{}/members", f.acme.id);

	let response = app.post(&path, Some(&f.alice), json!({ "user_id": f.carol.id().to_string() })).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await;
	assert_eq!(body["members"], json!([f.carol.id().to_string()]));
}

#[tokio::test]
async fn owner_cannot_be_added_as_member() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let response = app
		.post(
			&format!("/api/companies/{}/members", f.acme.id),
			Some(&f.alice),
			json!({ "user_id": f.alice.id().to_string() }),
		)
		.await;

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await["error"], "validation_failed");
}

#[tokio::test]
async fn removing_a_non_member_is_not_found() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let response = app
		.delete(&format!("/api/companies/{}/members/{}", f.acme.id, f.bob.id()), Some(&f.alice))
		.await;

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_user_id_is_bad_request() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/companies/{}/members", f.acme.id);

	let response = app.post(&path, Some(&f.alice), json!({ "user_id": "bob" })).await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await["error"], "invalid_id");

	let response = app.post(&path, Some(&f.alice), json!({})).await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await["error"], "validation_failed");
}

#[tokio::test]
async fn array_body_does_not_add_a_member() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let response = app
		.post(
			&format!("/api/companies/{}/members", f.acme.id),
			Some(&f.alice),
			json!([f.bob.id().to_string()]),
		)
		.await;

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await["error"], "validation_failed");
	assert_eq!(
		app.get(&format!("/api/companies/{}", f.acme.id), Some(&f.bob)).await.status(),
		StatusCode::FORBIDDEN
	);
}
