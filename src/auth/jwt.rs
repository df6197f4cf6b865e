//! [JWT] payload wrapper.
//!
//! [JWT]: https://jwt.io

use std::time::Duration;
use std::{fmt, ops};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A JWT.
///
/// This type wraps the claims we care about together with the registered
/// `exp` claim. Tokens without an `exp` claim never expire.
#[derive(Clone, Serialize, Deserialize)]
pub struct Jwt<T>
{
	/// The payload to encode in the token.
	#[serde(flatten)]
	payload: T,

	/// Timestamp (in seconds) of when this token will expire.
	#[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
	expiration_timestamp: Option<u64>,
}

impl<T> Jwt<T>
{
	/// Creates a new [`Jwt`] that will expire after the given duration.
	///
	/// You can encode it into a string using [`AuthService::encode_jwt()`].
	///
	/// [`AuthService::encode_jwt()`]: crate::auth::AuthService::encode_jwt
	pub fn new(payload: T, expires_after: Duration) -> Self
	{
		Self {
			payload,
			expiration_timestamp: Some(
				jsonwebtoken::get_current_timestamp() + expires_after.as_secs(),
			),
		}
	}

	/// Creates a new [`Jwt`] that expires at the given unix timestamp.
	pub fn expiring_at(payload: T, timestamp: u64) -> Self
	{
		Self { payload, expiration_timestamp: Some(timestamp) }
	}

	/// Creates a new [`Jwt`] without an expiration date.
	pub fn without_expiration(payload: T) -> Self
	{
		Self { payload, expiration_timestamp: None }
	}

	/// Returns a reference to the inner payload.
	pub fn payload(&self) -> &T
	{
		&self.payload
	}

	/// Returns the inner payload.
	pub fn into_payload(self) -> T
	{
		self.payload
	}

	/// Returns a [`chrono::DateTime`] of when this token will expire, if ever.
	pub fn expires_on(&self) -> Option<DateTime<Utc>>
	{
		self.expiration_timestamp
			.and_then(|secs| i64::try_from(secs).ok())
			.and_then(|secs| DateTime::from_timestamp(secs, 0))
	}
}

impl<T> fmt::Debug for Jwt<T>
where
	T: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		let mut debug = f.debug_struct("Jwt");

		debug.field("payload", self.payload());

		match self.expires_on() {
			Some(date) => debug.field(
				"expires_on",
				&format_args!("{}", date.format("%Y/%m/%d %H:%M:%S")),
			),
			None => debug.field("expires_on", &"never"),
		};

		debug.finish()
	}
}

impl<T> ops::Deref for Jwt<T>
{
	type Target = T;

	fn deref(&self) -> &Self::Target
	{
		self.payload()
	}
}
