// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP handlers.

pub mod companies;
pub mod health;
pub mod intents;
pub mod members;
pub mod resources;
pub mod view;
