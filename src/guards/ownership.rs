//! Guards that only let owners access their own resources.
//!
//! Each of these compares the session principal's ID against the owner of an
//! entity that an earlier stage attached to the [`RequestContext`]. They must
//! run after [`ProtectSession`] and after the corresponding loader.
//!
//! [`ProtectSession`]: super::ProtectSession

use super::{AuthorizationError, Guard, GuardError};
use crate::context::RequestContext;
use crate::models::UserID;

/// Succeeds if `owner` is the session principal, fails with `denial`
/// otherwise.
fn ensure_owner(
	ctx: &RequestContext,
	owner: UserID,
	denial: AuthorizationError,
) -> Result<(), GuardError>
{
	let session = ctx.session()?;

	tracing::Span::current()
		.record("session.user.id", format_args!("{}", session.id))
		.record("owner.id", format_args!("{owner}"));

	if session.id != owner {
		return Err(denial.into());
	}

	Ok(())
}

/// Only lets users modify their own account.
#[derive(Debug, Clone, Copy)]
pub struct ProtectUsersAccount;

impl Guard for ProtectUsersAccount
{
	#[tracing::instrument(
		level = "debug",
		name = "guards::protect_users_account",
		skip_all,
		fields(session.user.id = tracing::field::Empty, owner.id = tracing::field::Empty),
		err(Debug, level = "debug"),
	)]
	async fn check(&self, ctx: &mut RequestContext) -> Result<(), GuardError>
	{
		let owner = ctx.target_user()?.id;

		ensure_owner(ctx, owner, AuthorizationError::NotAccountOwner)
	}
}

/// Only lets users access products they listed.
#[derive(Debug, Clone, Copy)]
pub struct ProtectProductOwner;

impl Guard for ProtectProductOwner
{
	#[tracing::instrument(
		level = "debug",
		name = "guards::protect_product_owner",
		skip_all,
		fields(session.user.id = tracing::field::Empty, owner.id = tracing::field::Empty),
		err(Debug, level = "debug"),
	)]
	async fn check(&self, ctx: &mut RequestContext) -> Result<(), GuardError>
	{
		let owner = ctx.product()?.user_id;

		ensure_owner(ctx, owner, AuthorizationError::NotProductOwner)
	}
}

/// Only lets users access orders they placed.
#[derive(Debug, Clone, Copy)]
pub struct ProtectOrderOwner;

impl Guard for ProtectOrderOwner
{
	#[tracing::instrument(
		level = "debug",
		name = "guards::protect_order_owner",
		skip_all,
		fields(session.user.id = tracing::field::Empty, owner.id = tracing::field::Empty),
		err(Debug, level = "debug"),
	)]
	async fn check(&self, ctx: &mut RequestContext) -> Result<(), GuardError>
	{
		let owner = ctx.order()?.user_id;

		ensure_owner(ctx, owner, AuthorizationError::NotOrderOwner)
	}
}
