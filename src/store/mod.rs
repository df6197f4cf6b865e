//! Persistence for the entities guards compare against.
//!
//! Guards and loaders never talk to a database directly; they go through the
//! [`Store`] trait. The production implementation is [`MySqlStore`].

use std::future::Future;

use crate::models::{Order, OrderID, Product, ProductID, User, UserID};

mod mysql;
pub use mysql::MySqlStore;

/// Read access to users, products and orders.
///
/// Implementations must be cheap to clone; they are cloned into every route
/// that needs them.
pub trait Store: Clone + Send + Sync + 'static
{
	/// Looks up the user with the given ID, but only if their account is
	/// still active.
	fn find_active_user(
		&self,
		user_id: UserID,
	) -> impl Future<Output = sqlx::Result<Option<User>>> + Send;

	/// Looks up the user with the given ID, regardless of their status.
	fn find_user(&self, user_id: UserID) -> impl Future<Output = sqlx::Result<Option<User>>> + Send;

	/// Looks up the product with the given ID.
	fn find_product(
		&self,
		product_id: ProductID,
	) -> impl Future<Output = sqlx::Result<Option<Product>>> + Send;

	/// Looks up the order with the given ID.
	fn find_order(
		&self,
		order_id: OrderID,
	) -> impl Future<Output = sqlx::Result<Option<Order>>> + Send;
}
