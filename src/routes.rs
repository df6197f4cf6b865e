//! The API's routes.
//!
//! Every route is assembled from the same building blocks: [`ProtectSession`]
//! first, then the loader for whatever the route is about, then the guard
//! deciding whether the principal may access it. Handlers only run once every
//! stage has let the request through, and read the results from the
//! [`RequestContext`].

use axum::middleware::from_fn_with_state;
use axum::{routing, Json, Router};
use tower::ServiceBuilder;

use crate::auth::AuthService;
use crate::context::RequestContext;
use crate::guards::{
	GuardError,
	GuardLayer,
	ProtectAdmin,
	ProtectOrderOwner,
	ProtectProductOwner,
	ProtectSession,
	ProtectUsersAccount,
};
use crate::loaders;
use crate::models::{Order, Product, User};
use crate::store::Store;

/// Returns a router with all the API's routes.
pub fn router<S>(auth_svc: AuthService, store: S) -> Router
where
	S: Store,
{
	let session = || GuardLayer::new(ProtectSession::new(auth_svc.clone(), store.clone()));

	let me = Router::new()
		.route("/users/me", routing::get(get_session_user))
		.route_layer(session());

	let account = Router::new()
		.route("/users/:id", routing::get(get_target_user))
		.route_layer(
			ServiceBuilder::new()
				.layer(session())
				.layer(from_fn_with_state(store.clone(), loaders::load_user::<S>))
				.layer(GuardLayer::new(ProtectUsersAccount)),
		);

	let product = Router::new()
		.route("/products/:id", routing::get(get_product))
		.route_layer(
			ServiceBuilder::new()
				.layer(session())
				.layer(from_fn_with_state(store.clone(), loaders::load_product::<S>))
				.layer(GuardLayer::new(ProtectProductOwner)),
		);

	let order = Router::new()
		.route("/orders/:id", routing::get(get_order))
		.route_layer(
			ServiceBuilder::new()
				.layer(session())
				.layer(from_fn_with_state(store.clone(), loaders::load_order::<S>))
				.layer(GuardLayer::new(ProtectOrderOwner)),
		);

	let admin = Router::new()
		.route("/admin/users/:id", routing::get(get_target_user))
		.route_layer(
			ServiceBuilder::new()
				.layer(session())
				.layer(GuardLayer::new(ProtectAdmin))
				.layer(from_fn_with_state(store.clone(), loaders::load_user::<S>)),
		);

	Router::new()
		.merge(me)
		.merge(account)
		.merge(product)
		.merge(order)
		.merge(admin)
}

/// Returns the authenticated user.
async fn get_session_user(ctx: RequestContext) -> Result<Json<User>, GuardError>
{
	ctx.session().cloned().map(Json)
}

/// Returns the user whose account is being accessed.
async fn get_target_user(ctx: RequestContext) -> Result<Json<User>, GuardError>
{
	ctx.target_user().cloned().map(Json)
}

/// Returns the product that is being accessed.
async fn get_product(ctx: RequestContext) -> Result<Json<Product>, GuardError>
{
	ctx.product().cloned().map(Json)
}

/// Returns the order that is being accessed.
async fn get_order(ctx: RequestContext) -> Result<Json<Order>, GuardError>
{
	ctx.order().cloned().map(Json)
}
