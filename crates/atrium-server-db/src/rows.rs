// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Column encoding shared by the repositories.
//!
//! Timestamps are stored as RFC 3339 strings with nanosecond precision in UTC,
//! so lexical order on the column equals chronological order.

use atrium_server_auth::types::MalformedIdentifier;
use chrono::{DateTime, SecondsFormat, Utc};
use std::str::FromStr;

use crate::error::DbError;

pub(crate) fn encode_ts(ts: &DateTime<Utc>) -> String {
	ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn decode_ts(value: &str, column: &str) -> Result<DateTime<Utc>, DbError> {
	DateTime::parse_from_rfc3339(value)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
}

pub(crate) fn decode_opt_ts(
	value: Option<String>,
	column: &str,
) -> Result<Option<DateTime<Utc>>, DbError> {
	value.map(|v| decode_ts(&v, column)).transpose()
}

pub(crate) fn decode_id<T>(value: &str) -> Result<T, DbError>
where
	T: FromStr<Err = MalformedIdentifier>,
{
	value
		.parse()
		.map_err(|e: MalformedIdentifier| DbError::Internal(e.to_string()))
}
