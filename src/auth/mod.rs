//! The [`AuthService`] holds the key material for verifying session tokens.
//!
//! Clients prove who they are by sending a JWT in an
//! `Authorization: Bearer …` header. The token's payload is
//! [`SessionClaims`], which carries the ID of the user the session belongs
//! to. Tokens are signed with HS256 using a secret from the API
//! configuration; see [`Config::jwt_secret`].
//!
//! Issuing tokens is not the job of this API. [`AuthService::encode_jwt()`]
//! exists so tooling and tests can produce tokens that verify against the same
//! secret.
//!
//! [`Config::jwt_secret`]: crate::Config::jwt_secret

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::UserID;

pub mod jwt;
pub use jwt::Jwt;

/// The payload of a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims
{
	/// The ID of the user this session belongs to.
	pub id: UserID,
}

/// A service for encoding and verifying session tokens.
#[derive(Clone)]
pub struct AuthService
{
	/// Shared, read-only key material.
	jwt_state: Arc<JwtState>,
}

/// Everything `jsonwebtoken` needs to sign and verify tokens.
struct JwtState
{
	/// Header data to use when signing JWTs.
	header: jsonwebtoken::Header,

	/// Secret key to use when signing JWTs.
	encoding_key: jsonwebtoken::EncodingKey,

	/// Secret key to use when validating JWTs.
	decoding_key: jsonwebtoken::DecodingKey,

	/// Extra validation steps when validating JWTs.
	validation: jsonwebtoken::Validation,
}

impl fmt::Debug for AuthService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("AuthService").finish_non_exhaustive()
	}
}

impl AuthService
{
	/// Creates a new [`AuthService`] from the shared signing secret.
	pub fn new(jwt_secret: &str) -> Self
	{
		let algorithm = jsonwebtoken::Algorithm::HS256;
		let mut validation = jsonwebtoken::Validation::new(algorithm);

		// `exp` is checked whenever it is present, but tokens without one are
		// accepted.
		validation.required_spec_claims.clear();

		let jwt_state = Arc::new(JwtState {
			header: jsonwebtoken::Header::new(algorithm),
			encoding_key: jsonwebtoken::EncodingKey::from_secret(jwt_secret.as_bytes()),
			decoding_key: jsonwebtoken::DecodingKey::from_secret(jwt_secret.as_bytes()),
			validation,
		});

		Self { jwt_state }
	}

	/// Encodes a JWT into a signed token string.
	pub fn encode_jwt<T>(&self, jwt: &Jwt<T>) -> Result<String, jsonwebtoken::errors::Error>
	where
		T: Serialize,
	{
		jsonwebtoken::encode(&self.jwt_state.header, jwt, &self.jwt_state.encoding_key)
	}

	/// Verifies the signature and expiration date of `token` and decodes its
	/// payload.
	#[tracing::instrument(level = "trace", skip_all, err(Debug, level = "debug"))]
	pub fn decode_jwt<T>(&self, token: &str) -> Result<Jwt<T>, jsonwebtoken::errors::Error>
	where
		T: DeserializeOwned,
	{
		jsonwebtoken::decode(token, &self.jwt_state.decoding_key, &self.jwt_state.validation)
			.map(|jwt| jwt.claims)
	}
}
