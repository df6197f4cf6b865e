//! The guard reserving a route for administrators.

use super::{AuthorizationError, Guard, GuardError};
use crate::context::RequestContext;

/// Only lets the request through if the session principal is an admin.
///
/// Must run after [`ProtectSession`].
///
/// [`ProtectSession`]: super::ProtectSession
#[derive(Debug, Clone, Copy)]
pub struct ProtectAdmin;

impl Guard for ProtectAdmin
{
	#[tracing::instrument(
		level = "debug",
		name = "guards::protect_admin",
		skip_all,
		err(Debug, level = "debug"),
	)]
	async fn check(&self, ctx: &mut RequestContext) -> Result<(), GuardError>
	{
		let session = ctx.session()?;

		if !session.role.is_admin() {
			return Err(AuthorizationError::NotAdmin.into());
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	#[tokio::test]
	async fn admins_pass() -> color_eyre::Result<()>
	{
		let mut ctx = RequestContext {
			session: Some(testing::user(1, "admin")),
			..Default::default()
		};

		ProtectAdmin.check(&mut ctx).await?;

		Ok(())
	}

	#[tokio::test]
	async fn everybody_else_is_denied() -> color_eyre::Result<()>
	{
		for role in ["normal", "user", "Admin", ""] {
			let mut ctx = RequestContext {
				session: Some(testing::user(1, role)),
				..Default::default()
			};

			let error = ProtectAdmin.check(&mut ctx).await.unwrap_err();

			testing::assert_matches!(
				error,
				GuardError::Authorization(AuthorizationError::NotAdmin)
			);
			testing::assert_eq!(error.message(), "You do not have the right access level.");
		}

		Ok(())
	}

	#[tokio::test]
	async fn requires_a_session() -> color_eyre::Result<()>
	{
		let result = ProtectAdmin.check(&mut RequestContext::default()).await;

		testing::assert_matches!(result, Err(GuardError::MissingContext { .. }));

		Ok(())
	}

	#[tokio::test]
	async fn same_context_same_decision() -> color_eyre::Result<()>
	{
		for (role, is_admin) in [("admin", true), ("normal", false)] {
			let mut ctx = RequestContext {
				session: Some(testing::user(1, role)),
				..Default::default()
			};

			let first = ProtectAdmin.check(&mut ctx).await;
			let second = ProtectAdmin.check(&mut ctx).await;

			testing::assert_eq!(first.is_ok(), is_admin);
			testing::assert_eq!(second.is_ok(), is_admin);
			testing::assert_eq!(
				first.err().map(|error| error.message()),
				second.err().map(|error| error.message())
			);
		}

		Ok(())
	}
}
