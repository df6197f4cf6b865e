//! Middleware that attaches the resource a route is about to the
//! [`RequestContext`].
//!
//! Each loader takes the `:id` path parameter, looks the entity up in the
//! [`Store`], and responds with `404 Not Found` if it does not exist. Loaders
//! are used with [`axum::middleware::from_fn_with_state()`], between
//! [`ProtectSession`] and the ownership guard that needs the entity.
//!
//! [`ProtectSession`]: crate::guards::ProtectSession

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::context::RequestContext;
use crate::models::{OrderID, ProductID, UserID};
use crate::store::Store;

/// Errors that can occur while loading a resource.
#[derive(Debug, Error)]
pub enum LoadError
{
	/// There is no entity with the requested ID.
	#[error("{what} not found")]
	NotFound
	{
		/// What we were looking for.
		what: &'static str,
	},

	/// Something went wrong communicating with the database.
	#[error("something went wrong")]
	Database(#[from] sqlx::Error),
}

impl IntoResponse for LoadError
{
	fn into_response(self) -> Response
	{
		let status = match self {
			Self::NotFound { .. } => StatusCode::NOT_FOUND,
			Self::Database(ref error) => {
				tracing::error!(%error, "failed to load resource");
				StatusCode::INTERNAL_SERVER_ERROR
			}
		};

		(status, Json(json!({ "message": self.to_string() }))).into_response()
	}
}

/// Loads the user with the ID from the path into
/// [`RequestContext::target_user`].
#[tracing::instrument(
	level = "debug",
	name = "loaders::load_user",
	skip_all,
	fields(user.id = %user_id),
	err(Debug, level = "debug"),
)]
pub async fn load_user<S>(
	State(store): State<S>,
	Path(user_id): Path<UserID>,
	mut req: Request,
	next: Next,
) -> Result<Response, LoadError>
where
	S: Store,
{
	let user = store
		.find_user(user_id)
		.await?
		.ok_or(LoadError::NotFound { what: "User" })?;

	RequestContext::get_or_create(&mut req).target_user = Some(user);

	Ok(next.run(req).await)
}

/// Loads the product with the ID from the path into
/// [`RequestContext::product`].
#[tracing::instrument(
	level = "debug",
	name = "loaders::load_product",
	skip_all,
	fields(product.id = %product_id),
	err(Debug, level = "debug"),
)]
pub async fn load_product<S>(
	State(store): State<S>,
	Path(product_id): Path<ProductID>,
	mut req: Request,
	next: Next,
) -> Result<Response, LoadError>
where
	S: Store,
{
	let product = store
		.find_product(product_id)
		.await?
		.ok_or(LoadError::NotFound { what: "Product" })?;

	RequestContext::get_or_create(&mut req).product = Some(product);

	Ok(next.run(req).await)
}

/// Loads the order with the ID from the path into [`RequestContext::order`].
#[tracing::instrument(
	level = "debug",
	name = "loaders::load_order",
	skip_all,
	fields(order.id = %order_id),
	err(Debug, level = "debug"),
)]
pub async fn load_order<S>(
	State(store): State<S>,
	Path(order_id): Path<OrderID>,
	mut req: Request,
	next: Next,
) -> Result<Response, LoadError>
where
	S: Store,
{
	let order = store
		.find_order(order_id)
		.await?
		.ok_or(LoadError::NotFound { what: "Order" })?;

	RequestContext::get_or_create(&mut req).order = Some(order);

	Ok(next.run(req).await)
}

#[cfg(test)]
mod tests
{
	use axum::body::Body;
	use axum::routing;
	use axum::Router;
	use tower::ServiceExt;

	use super::*;
	use crate::testing::{self, MemoryStore};

	fn router(store: MemoryStore) -> Router
	{
		Router::new()
			.route(
				"/products/:id",
				routing::get(|ctx: RequestContext| async move {
					Json(ctx.product().map(|product| product.title.clone()).ok())
				}),
			)
			.route_layer(axum::middleware::from_fn_with_state(
				store,
				load_product::<MemoryStore>,
			))
	}

	#[tokio::test]
	async fn loads_existing_products() -> color_eyre::Result<()>
	{
		let store = MemoryStore::default().with_product(testing::product(3, 7));
		let req = Request::builder().uri("/products/3").body(Body::empty())?;
		let res = router(store).oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::OK);

		Ok(())
	}

	#[tokio::test]
	async fn missing_products_are_not_found() -> color_eyre::Result<()>
	{
		let store = MemoryStore::default();
		let req = Request::builder().uri("/products/3").body(Body::empty())?;
		let res = router(store).oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::NOT_FOUND);
		testing::assert_eq!(testing::response_message(res).await?, "Product not found");

		Ok(())
	}
}
