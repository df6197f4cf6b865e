//! Request guards.
//!
//! A guard inspects the [`RequestContext`] of the current request and decides
//! whether the request may proceed. Guards are composed into routes as
//! [`GuardLayer`]s and run strictly in the order the layers are applied:
//!
//! ```ignore
//! let stack = ServiceBuilder::new()
//!     .layer(GuardLayer::new(ProtectSession::new(auth_svc, store.clone())))
//!     .layer(axum::middleware::from_fn_with_state(store, loaders::load_product::<S>))
//!     .layer(GuardLayer::new(ProtectProductOwner));
//! ```
//!
//! The first guard that returns an error ends the request; nothing after it
//! runs.

use std::future::Future;
use std::task::{self, Poll};

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;

use crate::context::RequestContext;

mod error;
pub use error::{AuthenticationError, AuthorizationError, GuardError};

mod session;
pub use session::ProtectSession;

mod admin;
pub use admin::ProtectAdmin;

mod ownership;
pub use ownership::{ProtectOrderOwner, ProtectProductOwner, ProtectUsersAccount};

/// A single access check.
///
/// Returning `Ok(())` lets the request continue to the next stage; returning
/// an error denies it. Guards may mutate the context, e.g. to record the
/// session principal.
///
/// Every guard is async, even if it never awaits anything, so all of them can
/// be composed the same way.
pub trait Guard: Clone + Send + Sync + 'static
{
	/// Checks whether the request described by `ctx` may proceed.
	fn check(&self, ctx: &mut RequestContext) -> impl Future<Output = Result<(), GuardError>> + Send;
}

/// A layer producing the [`GuardService`] middleware.
#[derive(Debug, Clone)]
pub struct GuardLayer<G>
{
	/// The guard to run.
	guard: G,
}

impl<G> GuardLayer<G>
where
	G: Guard,
{
	/// Creates a new [`GuardLayer`].
	pub fn new(guard: G) -> Self
	{
		Self { guard }
	}
}

impl<S, G> tower::Layer<S> for GuardLayer<G>
where
	G: Guard,
{
	type Service = GuardService<S, G>;

	fn layer(&self, inner: S) -> Self::Service
	{
		GuardService { guard: self.guard.clone(), inner }
	}
}

/// A middleware that runs a [`Guard`] before passing on the request.
///
/// You can create an instance of this service using [`GuardLayer`].
#[derive(Debug, Clone)]
pub struct GuardService<S, G>
{
	/// The guard to run.
	guard: G,

	/// The inner service.
	inner: S,
}

impl<S, G> tower::Service<Request> for GuardService<S, G>
where
	S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
	S::Future: Send,
	G: Guard,
{
	type Response = Response;
	type Error = S::Error;
	type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

	fn poll_ready(&mut self, cx: &mut task::Context<'_>) -> Poll<Result<(), Self::Error>>
	{
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, req: Request) -> Self::Future
	{
		let guard = self.guard.clone();

		// The clone might not be ready yet, so we keep the one that is and
		// leave the clone in its place.
		let clone = self.inner.clone();
		let inner = std::mem::replace(&mut self.inner, clone);

		Box::pin(svc_impl(guard, inner, req))
	}
}

/// The relevant implementation of `<GuardService as tower::Service>::call()`.
#[tracing::instrument(
	level = "debug",
	name = "guard",
	skip_all,
	fields(guard = guard_name::<G>()),
)]
async fn svc_impl<S, G>(guard: G, mut inner: S, mut req: Request) -> Result<Response, S::Error>
where
	S: tower::Service<Request, Response = Response> + Send,
	S::Future: Send,
	G: Guard,
{
	let mut ctx = RequestContext::take(&mut req);

	if let Err(error) = guard.check(&mut ctx).await {
		return Ok(error.into_response());
	}

	tracing::trace!("access granted");

	req.extensions_mut().insert(ctx);
	inner.call(req).await
}

/// Returns the name of `G` without its module path or generic arguments.
fn guard_name<G>() -> &'static str
{
	short_type_name(std::any::type_name::<G>())
}

/// `storefront_api::guards::ProtectSession<storefront_api::store::MySqlStore>`
/// becomes `ProtectSession`.
fn short_type_name(type_name: &str) -> &str
{
	let path = type_name.split('<').next().unwrap_or_default();

	path.rsplit("::").next().unwrap_or_default()
}
