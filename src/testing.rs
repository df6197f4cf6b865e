//! This module contains helpers for unit tests.

use std::collections::HashMap;
use std::time::Duration;

use axum::response::Response;

use crate::auth::{AuthService, Jwt, SessionClaims};
use crate::models::{
	AccountStatus,
	Order,
	OrderID,
	Product,
	ProductID,
	Role,
	User,
	UserID,
};
use crate::store::Store;

pub fn auth_svc() -> AuthService
{
	AuthService::new("storefront-test-secret")
}

/// Encodes a session token for `user_id` that is valid for the next hour.
pub fn session_token(auth_svc: &AuthService, user_id: UserID) -> color_eyre::Result<String>
{
	let jwt = Jwt::new(SessionClaims { id: user_id }, Duration::from_secs(60 * 60));

	Ok(auth_svc.encode_jwt(&jwt)?)
}

/// Encodes a session token for `user_id` that expired a day ago.
pub fn expired_session_token(auth_svc: &AuthService, user_id: UserID) -> color_eyre::Result<String>
{
	let yesterday = jsonwebtoken::get_current_timestamp() - (60 * 60 * 24);
	let jwt = Jwt::expiring_at(SessionClaims { id: user_id }, yesterday);

	Ok(auth_svc.encode_jwt(&jwt)?)
}

pub fn user(id: u64, role: &str) -> User
{
	User {
		id: UserID(id),
		name: format!("user-{id}"),
		email: format!("user-{id}@example.com"),
		role: Role::from_column(role),
		status: AccountStatus::Active,
	}
}

pub fn product(id: u64, owner: u64) -> Product
{
	Product { id: ProductID(id), title: format!("product-{id}"), price: 9.99, user_id: UserID(owner) }
}

pub fn order(id: u64, owner: u64) -> Order
{
	Order {
		id: OrderID(id),
		user_id: UserID(owner),
		total_price: 19.98,
		status: String::from("active"),
	}
}

/// Reads the `message` field out of a JSON response body.
pub async fn response_message(response: Response) -> color_eyre::Result<String>
{
	let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
	let json = serde_json::from_slice::<serde_json::Value>(&body)?;

	json.get("message")
		.and_then(|message| message.as_str())
		.map(String::from)
		.ok_or_else(|| color_eyre::eyre::eyre!("response has no message"))
}

/// An in-memory [`Store`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore
{
	users: HashMap<UserID, User>,
	products: HashMap<ProductID, Product>,
	orders: HashMap<OrderID, Order>,
	failing: bool,
}

impl MemoryStore
{
	pub fn with_user(mut self, user: User) -> Self
	{
		self.users.insert(user.id, user);
		self
	}

	pub fn with_product(mut self, product: Product) -> Self
	{
		self.products.insert(product.id, product);
		self
	}

	pub fn with_order(mut self, order: Order) -> Self
	{
		self.orders.insert(order.id, order);
		self
	}

	/// Makes every query fail as if the database went away.
	pub fn failing(mut self) -> Self
	{
		self.failing = true;
		self
	}

	fn lookup<K, V>(&self, table: &HashMap<K, V>, key: K) -> sqlx::Result<Option<V>>
	where
		K: std::hash::Hash + Eq,
		V: Clone,
	{
		if self.failing {
			return Err(sqlx::Error::PoolTimedOut);
		}

		Ok(table.get(&key).cloned())
	}
}

impl Store for MemoryStore
{
	async fn find_active_user(&self, user_id: UserID) -> sqlx::Result<Option<User>>
	{
		let user = self.lookup(&self.users, user_id)?;

		Ok(user.filter(|user| user.status == AccountStatus::Active))
	}

	async fn find_user(&self, user_id: UserID) -> sqlx::Result<Option<User>>
	{
		self.lookup(&self.users, user_id)
	}

	async fn find_product(&self, product_id: ProductID) -> sqlx::Result<Option<Product>>
	{
		self.lookup(&self.products, product_id)
	}

	async fn find_order(&self, order_id: OrderID) -> sqlx::Result<Option<Order>>
	{
		self.lookup(&self.orders, order_id)
	}
}

/// Global constructor that will run before tests.
#[ctor::ctor]
fn ctor()
{
	use tracing_subscriber::fmt::format::FmtSpan;
	use tracing_subscriber::EnvFilter;

	color_eyre::install().expect("failed to install color-eyre");
	tracing_subscriber::fmt()
		.compact()
		.with_ansi(true)
		.with_file(true)
		.with_level(true)
		.with_line_number(true)
		.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
		.with_target(true)
		.with_test_writer()
		.with_env_filter(EnvFilter::from_default_env())
		.init();
}

macro_rules! assert {
	($expr:expr $(, $($msg:tt)*)?) => {
		::color_eyre::eyre::ensure!($expr $(, $($msg)*)?)
	};
}

macro_rules! assert_eq {
	($lhs:expr, $rhs:expr $(,)?) => {
		match (&($lhs), &($rhs)) {
			(lhs, rhs) => {
				if lhs != rhs {
					::color_eyre::eyre::bail!(
						"assertion `{} == {}` failed\n  lhs: {:?}\n  rhs: {:?}",
						stringify!($lhs),
						stringify!($rhs),
						lhs,
						rhs,
					);
				}
			}
		}
	};
}

macro_rules! assert_matches {
	($expr:expr, $pat:pat $(if $cond:expr)? $(,)?) => {
		::color_eyre::eyre::ensure!(
			matches!($expr, $pat $(if $cond)?),
			"`{}` does not match `{}`",
			stringify!($expr),
			stringify!($pat),
		)
	};
}

pub(crate) use {assert, assert_eq, assert_matches};
