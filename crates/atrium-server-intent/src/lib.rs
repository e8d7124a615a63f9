// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Free-text intent answering over a company's public catalog.

pub mod error;
pub mod handlers;
pub mod intent;
pub mod params;
pub mod router;

pub use error::{IntentError, Result};
pub use handlers::{HandlerOutput, IntentContext, IntentHandler};
pub use intent::{resolve_intent, CanonicalIntent};
pub use params::{IntentParameters, DEFAULT_PRODUCT_LIMIT};
pub use router::{IntentResponse, IntentRouter};
