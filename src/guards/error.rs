//! The errors a guard can deny a request with.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// The requester could not prove who they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthenticationError
{
	/// The `Authorization: Bearer …` header was missing or malformed.
	#[error("The token was invalid")]
	InvalidToken,

	/// The token was valid, but its user does not exist or is not active
	/// anymore.
	#[error("The owner of the session is no longer active")]
	InactiveSessionOwner,
}

/// The requester proved who they are, but may not do what they are trying
/// to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthorizationError
{
	/// The account being accessed belongs to somebody else.
	#[error("You are not the owner of this account.")]
	NotAccountOwner,

	/// The action requires the admin role.
	#[error("You do not have the right access level.")]
	NotAdmin,

	/// The product being accessed belongs to somebody else.
	#[error("Sorry...this is not your product.")]
	NotProductOwner,

	/// The order being accessed belongs to somebody else.
	#[error("Sorry...this is not your order")]
	NotOrderOwner,
}

/// Why a guard denied a request.
///
/// This type implements [`IntoResponse`]; the response carries
/// [`GuardError::status()`] and a JSON body with [`GuardError::message()`].
#[derive(Debug, Error)]
pub enum GuardError
{
	/// See [`AuthenticationError`].
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),

	/// See [`AuthorizationError`].
	#[error(transparent)]
	Authorization(#[from] AuthorizationError),

	/// The bearer token failed signature or expiry verification.
	#[error("The token could not be verified")]
	Verification(#[from] jsonwebtoken::errors::Error),

	/// Something went wrong communicating with the database.
	#[error("something went wrong")]
	Database(#[from] sqlx::Error),

	/// A guard ran before the stage that was supposed to provide its input.
	///
	/// This is a bug in how the route was assembled, not something the
	/// client did wrong.
	#[error("missing {what} in request context")]
	MissingContext
	{
		/// What was missing.
		what: &'static str,
	},
}

impl GuardError
{
	/// The HTTP status code this error should produce.
	pub fn status(&self) -> StatusCode
	{
		match self {
			Self::Authentication(_) | Self::Authorization(_) | Self::Verification(_) => {
				StatusCode::FORBIDDEN
			}
			Self::Database(_) | Self::MissingContext { .. } => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// The human readable message this error should produce.
	pub fn message(&self) -> String
	{
		match self {
			Self::MissingContext { .. } => String::from("something went wrong"),
			error => error.to_string(),
		}
	}
}

impl IntoResponse for GuardError
{
	fn into_response(self) -> Response
	{
		let status = self.status();
		let message = self.message();

		if status.is_server_error() {
			tracing::error!(error = ?self, "internal server error occurred");
		} else {
			tracing::debug!(error = ?self, %message, "denying request");
		}

		(status, Json(json!({ "message": message }))).into_response()
	}
}
