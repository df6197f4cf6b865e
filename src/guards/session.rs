//! The guard that authenticates the session behind a bearer token.

use std::fmt;

use super::{AuthenticationError, Guard, GuardError};
use crate::auth::{AuthService, SessionClaims};
use crate::context::RequestContext;
use crate::store::Store;

/// Authenticates the request and records the session principal.
///
/// 1. The token is taken from the `Authorization: Bearer …` header.
/// 2. Its signature and expiration date are verified.
/// 3. The user named by its `id` claim is looked up; only active users count.
/// 4. That user becomes [`RequestContext::session`].
#[derive(Clone)]
pub struct ProtectSession<S>
{
	/// For verifying tokens.
	auth_svc: AuthService,

	/// For resolving the token's user.
	store: S,
}

impl<S> fmt::Debug for ProtectSession<S>
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("ProtectSession").finish_non_exhaustive()
	}
}

impl<S> ProtectSession<S>
where
	S: Store,
{
	/// Creates a new [`ProtectSession`].
	pub fn new(auth_svc: AuthService, store: S) -> Self
	{
		Self { auth_svc, store }
	}
}

impl<S> Guard for ProtectSession<S>
where
	S: Store,
{
	#[tracing::instrument(
		level = "debug",
		name = "guards::protect_session",
		skip_all,
		fields(session.user.id = tracing::field::Empty),
		err(Debug, level = "debug"),
	)]
	async fn check(&self, ctx: &mut RequestContext) -> Result<(), GuardError>
	{
		let token = ctx
			.bearer_token
			.as_deref()
			.ok_or(AuthenticationError::InvalidToken)?;

		let claims = self
			.auth_svc
			.decode_jwt::<SessionClaims>(token)?
			.into_payload();

		tracing::Span::current().record("session.user.id", format_args!("{}", claims.id));

		let user = self
			.store
			.find_active_user(claims.id)
			.await?
			.ok_or(AuthenticationError::InactiveSessionOwner)?;

		tracing::debug!("authenticated session");

		ctx.session = Some(user);

		Ok(())
	}
}
