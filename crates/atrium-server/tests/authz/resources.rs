// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::support::{body_json, run_authz_cases, AuthzCase, TestApp};

async fn first_product_id(app: &TestApp) -> String {
	let response = app
		.get(&format!("/api/companies/{}/products", app.fixtures.acme.id), Some(&app.fixtures.alice))
		.await;
	body_json(response).await["products"][0]["id"]
		.as_str()
		.unwrap()
		.to_string()
}

#[tokio::test]
async fn scoped_resources_require_membership() {
	run_authz_cases(|f| {
		let products = format!("/api/companies/{}/products", f.acme.id);
		let new_product = json!({ "name": "Portable Hole", "price": 12.0 });
		vec![
			AuthzCase {
				name: "anonymous cannot list",
				method: Method::GET,
				path: products.clone(),
				user: None,
				body: None,
				expected_status: StatusCode::UNAUTHORIZED,
			},
			AuthzCase {
				name: "owner lists",
				method: Method::GET,
				path: products.clone(),
				user: Some(f.alice.clone()),
				body: None,
				expected_status: StatusCode::OK,
			},
			AuthzCase {
				name: "member lists",
				method: Method::GET,
				path: products.clone(),
				user: Some(f.carol.clone()),
				body: None,
				expected_status: StatusCode::OK,
			},
			AuthzCase {
				name: "outsider cannot list",
				method: Method::GET,
				path: products.clone(),
				user: Some(f.bob.clone()),
				body: None,
				expected_status: StatusCode::FORBIDDEN,
			},
			AuthzCase {
				name: "admin without membership cannot list",
				method: Method::GET,
				path: products.clone(),
				user: Some(f.admin.clone()),
				body: None,
				expected_status: StatusCode::FORBIDDEN,
			},
			AuthzCase {
				name: "member creates",
				method: Method::POST,
				path: products.clone(),
				user: Some(f.carol.clone()),
				body: Some(new_product.clone()),
				expected_status: StatusCode::CREATED,
			},
			AuthzCase {
				name: "outsider cannot create",
				method: Method::POST,
				path: products.clone(),
				user: Some(f.bob.clone()),
				body: Some(new_product.clone()),
				expected_status: StatusCode::FORBIDDEN,
			},
			AuthzCase {
				name: "superadmin creates",
				method: Method::POST,
				path: products,
				user: Some(f.root.clone()),
				body: Some(new_product),
				expected_status: StatusCode::CREATED,
			},
		]
	})
	.await;
}

#[tokio::test]
async fn member_can_update_and_delete_resources() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let product = format!("/api/companies/{}/products/{}", f.acme.id, first_product_id(&app).await);

	let response = app.patch(&product, Some(&f.carol), json!({ "price": 75.25 })).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await;
	assert_eq!(body["price"], 75.25);

	let response = app.patch(&product, Some(&f.bob), json!({ "price": 1.0 })).await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let response = app.delete(&product, Some(&f.carol)).await;
	assert_eq!(response.status(), StatusCode::NO_CONTENT);

	let response = app.get(&product, Some(&f.alice)).await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_leaves_omitted_fields_untouched() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let product = format!("/api/companies/{}/products/{}", f.acme.id, first_product_id(&app).await);

	let before = body_json(app.get(&product, Some(&f.alice)).await).await;
	let response = app.patch(&product, Some(&f.alice), json!({ "category": "tools" })).await;
	assert_eq!(response.status(), StatusCode::OK);
	let after = body_json(response).await;

	assert_eq!(after["category"], "tools");
	assert_eq!(after["name"], before["name"]);
	assert_eq!(after["price"], before["price"]);
	assert_eq!(after["created_at"], before["created_at"]);
}

#[tokio::test]
async fn resource_under_another_company_is_not_found() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let product_id = first_product_id(&app).await;

	// bob owns globex, so authorization passes; the product belongs to acme
	let path = format!("/api/companies/{}/products/{product_id}", f.globex.id);
	assert_eq!(app.get(&path, Some(&f.bob)).await.status(), StatusCode::NOT_FOUND);
	assert_eq!(
		app.patch(&path, Some(&f.bob), json!({ "price": 0.5 })).await.status(),
		StatusCode::NOT_FOUND
	);
	assert_eq!(app.delete(&path, Some(&f.bob)).await.status(), StatusCode::NOT_FOUND);

	// untouched under its own company
	let path = format!("/api/companies/{}/products/{product_id}", f.acme.id);
	let response = app.get(&path, Some(&f.alice)).await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_ne!(body_json(response).await["price"], 0.5);
}

#[tokio::test]
async fn unknown_kind_is_not_found() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let response = app.get(&format!("/api/companies/{}/widgets", f.acme.id), Some(&f.alice)).await;

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert_eq!(body_json(response).await["error"], "not_found");
}

#[tokio::test]
async fn malformed_resource_id_is_bad_request() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let response = app
		.get(&format!("/api/companies/{}/offers/42", f.acme.id), Some(&f.alice))
		.await;

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await["error"], "invalid_id");
}

#[tokio::test]
async fn listing_is_newest_first() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let projects = format!("/api/companies/{}/projects", f.acme.id);

	for name in ["Road Runner Trap", "Giant Magnet"] {
		let response = app
			.post(&projects, Some(&f.alice), json!({ "name": name, "description": "wip", "status": "active" }))
			.await;
		assert_eq!(response.status(), StatusCode::CREATED);
	}

	let body = body_json(app.get(&projects, Some(&f.alice)).await).await;
	assert_eq!(body["total"], 2);
	let names: Vec<&str> = body["projects"]
		.as_array()
		.unwrap()
		.iter()
		.map(|p| p["name"].as_str().unwrap())
		.collect();
	assert_eq!(names, vec!["Giant Magnet", "Road Runner Trap"]);
}

mod validation {
	use super::*;

	async fn create(app: &TestApp, kind: &str, body: Value) -> StatusCode {
		app.post(
			&format!("/api/companies/{}/{kind}", app.fixtures.acme.id),
			Some(&app.fixtures.alice),
			body,
		)
		.await
		.status()
	}

	#[tokio::test]
	async fn product_requires_name_and_price() {
		let app = TestApp::new().await;
		assert_eq!(create(&app, "products", json!({ "price": 5.0 })).await, StatusCode::BAD_REQUEST);
		assert_eq!(create(&app, "products", json!({ "name": "Bird Seed" })).await, StatusCode::BAD_REQUEST);
		assert_eq!(
			create(&app, "products", json!({ "name": "Bird Seed", "price": "cheap" })).await,
			StatusCode::BAD_REQUEST
		);
		assert_eq!(
			create(&app, "products", json!({ "name": "Bird Seed", "price": 5.0 })).await,
			StatusCode::CREATED
		);
	}

	#[tokio::test]
	async fn offer_requires_title_and_discount() {
		let app = TestApp::new().await;
		assert_eq!(create(&app, "offers", json!({ "discount": 10.0 })).await, StatusCode::BAD_REQUEST);
		assert_eq!(create(&app, "offers", json!({ "title": "Spring Sale" })).await, StatusCode::BAD_REQUEST);
		assert_eq!(
			create(&app, "offers", json!({ "title": "Spring Sale", "discount": 10.0 })).await,
			StatusCode::CREATED
		);
	}

	#[tokio::test]
	async fn array_bodies_are_rejected() {
		let app = TestApp::new().await;
		assert_eq!(create(&app, "products", json!(["Sprocket", "", 3.0])).await, StatusCode::BAD_REQUEST);
		assert_eq!(create(&app, "projects", json!(["Launchpad"])).await, StatusCode::BAD_REQUEST);
		assert_eq!(create(&app, "offers", json!(["Spring Sale", "", 10.0])).await, StatusCode::BAD_REQUEST);

		let products = body_json(
			app.get(
				&format!("/api/companies/{}/products", app.fixtures.acme.id),
				Some(&app.fixtures.alice),
			)
			.await,
		)
		.await;
		assert_eq!(products["total"], 2);
	}

	#[tokio::test]
	async fn project_requires_name() {
		let app = TestApp::new().await;
		assert_eq!(create(&app, "projects", json!({ "name": "" })).await, StatusCode::BAD_REQUEST);
		assert_eq!(create(&app, "projects", json!({ "name": "Launchpad" })).await, StatusCode::CREATED);
	}

	#[tokio::test]
	async fn blank_name_in_patch_is_rejected() {
		let app = TestApp::new().await;
		let path = format!(
			"/api/companies/{}/products/{}",
			app.fixtures.acme.id,
			first_product_id(&app).await
		);
		let response = app.patch(&path, Some(&app.fixtures.alice), json!({ "name": " " })).await;
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}
}
