//! [`Store`] implementation backed by MySQL.
//!
//! Expected tables:
//!
//! | table      | columns                                                     |
//! |------------|-------------------------------------------------------------|
//! | `users`    | `id`, `name`, `email`, `role`, `status`                     |
//! | `products` | `id`, `title`, `price` (`FLOAT`/`DOUBLE`), `user_id`        |
//! | `orders`   | `id`, `user_id`, `total_price` (`FLOAT`/`DOUBLE`), `status` |
//!
//! Keys may be signed or `UNSIGNED` integer columns of any width; negative
//! keys are rejected when decoding.

use std::fmt;

use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, MySql, Pool, Row};

use super::Store;
use crate::models::{AccountStatus, Order, OrderID, Product, ProductID, Role, User, UserID};

/// A [`Store`] reading from a MySQL database.
#[derive(Clone)]
pub struct MySqlStore
{
	/// Connection pool to the backing database.
	database: Pool<MySql>,
}

impl fmt::Debug for MySqlStore
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("MySqlStore").finish_non_exhaustive()
	}
}

impl MySqlStore
{
	/// Creates a new [`MySqlStore`].
	pub fn new(database: Pool<MySql>) -> Self
	{
		Self { database }
	}
}

impl Store for MySqlStore
{
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn find_active_user(&self, user_id: UserID) -> sqlx::Result<Option<User>>
	{
		sqlx::query_as(
			r"
			SELECT
			  id,
			  name,
			  email,
			  role,
			  status
			FROM
			  users
			WHERE
			  id = ?
			  AND status = ?
			LIMIT
			  1
			",
		)
		.bind(user_id)
		.bind(AccountStatus::ACTIVE)
		.fetch_optional(&self.database)
		.await
	}

	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn find_user(&self, user_id: UserID) -> sqlx::Result<Option<User>>
	{
		sqlx::query_as(
			r"
			SELECT
			  id,
			  name,
			  email,
			  role,
			  status
			FROM
			  users
			WHERE
			  id = ?
			LIMIT
			  1
			",
		)
		.bind(user_id)
		.fetch_optional(&self.database)
		.await
	}

	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn find_product(&self, product_id: ProductID) -> sqlx::Result<Option<Product>>
	{
		sqlx::query_as(
			r"
			SELECT
			  id,
			  title,
			  price,
			  user_id
			FROM
			  products
			WHERE
			  id = ?
			LIMIT
			  1
			",
		)
		.bind(product_id)
		.fetch_optional(&self.database)
		.await
	}

	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn find_order(&self, order_id: OrderID) -> sqlx::Result<Option<Order>>
	{
		sqlx::query_as(
			r"
			SELECT
			  id,
			  user_id,
			  total_price,
			  status
			FROM
			  orders
			WHERE
			  id = ?
			LIMIT
			  1
			",
		)
		.bind(order_id)
		.fetch_optional(&self.database)
		.await
	}
}

impl FromRow<'_, MySqlRow> for User
{
	fn from_row(row: &MySqlRow) -> sqlx::Result<Self>
	{
		Ok(Self {
			id: try_get_id(row, "id")?,
			name: row.try_get("name")?,
			email: row.try_get("email")?,
			role: Role::from_column(row.try_get("role")?),
			status: AccountStatus::from_column(row.try_get("status")?),
		})
	}
}

impl FromRow<'_, MySqlRow> for Product
{
	fn from_row(row: &MySqlRow) -> sqlx::Result<Self>
	{
		Ok(Self {
			id: try_get_id(row, "id")?,
			title: row.try_get("title")?,
			price: row.try_get("price")?,
			user_id: try_get_id(row, "user_id")?,
		})
	}
}

impl FromRow<'_, MySqlRow> for Order
{
	fn from_row(row: &MySqlRow) -> sqlx::Result<Self>
	{
		Ok(Self {
			id: try_get_id(row, "id")?,
			user_id: try_get_id(row, "user_id")?,
			total_price: row.try_get("total_price")?,
			status: row.try_get("status")?,
		})
	}
}

/// Reads an integer key from either a signed or an `UNSIGNED` column.
fn try_get_id<T>(row: &MySqlRow, column: &str) -> sqlx::Result<T>
where
	T: From<u64>,
{
	match row.try_get::<i64, _>(column) {
		Ok(signed) => non_negative_id(column, signed).map(T::from),
		Err(_) => row.try_get::<u64, _>(column).map(T::from),
	}
}

/// Converts a signed key, rejecting negative values.
fn non_negative_id(column: &str, value: i64) -> sqlx::Result<u64>
{
	u64::try_from(value).map_err(|error| sqlx::Error::ColumnDecode {
		index: column.to_owned(),
		source: Box::new(error),
	})
}
