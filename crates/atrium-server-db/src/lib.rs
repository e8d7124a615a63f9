// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite persistence for companies and their catalogs.

pub mod catalog;
pub mod company;
pub mod error;
pub mod pool;
mod rows;
pub mod schema;
pub mod testing;
pub mod types;

pub use catalog::{CatalogRepository, CatalogStore};
pub use company::{CompanyRepository, CompanyStore};
pub use error::{DbError, Result};
pub use pool::create_pool;
pub use schema::run_migrations;
pub use types::{Offer, Product, Project, ResourceKind};
