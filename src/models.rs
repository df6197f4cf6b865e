//! The entities that guards compare against each other.
//!
//! Every entity here is loaded from the [`Store`] and attached to a
//! [`RequestContext`] by some earlier pipeline stage.
//!
//! [`Store`]: crate::store::Store
//! [`RequestContext`]: crate::context::RequestContext

use serde::{Deserialize, Serialize};

crate::macros::make_id! {
	/// A unique identifier for a [`User`].
	UserID
}

crate::macros::make_id! {
	/// A unique identifier for a [`Product`].
	ProductID
}

crate::macros::make_id! {
	/// A unique identifier for an [`Order`].
	OrderID
}

/// A user's access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role
{
	/// May perform administrative actions.
	Admin,

	/// Everybody else.
	Normal,
}

impl Role
{
	/// Interprets the raw `role` column.
	///
	/// Only the exact value `admin` grants administrative access.
	pub fn from_column(value: &str) -> Self
	{
		match value {
			"admin" => Self::Admin,
			_ => Self::Normal,
		}
	}

	/// Whether this is [`Role::Admin`].
	pub const fn is_admin(self) -> bool
	{
		matches!(self, Self::Admin)
	}
}

/// Whether an account may still be used to authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus
{
	/// The account is in good standing.
	Active,

	/// The account was deleted or disabled.
	Inactive,
}

impl AccountStatus
{
	/// The value of the `status` column for active accounts.
	pub const ACTIVE: &'static str = "active";

	/// Interprets the raw `status` column.
	pub fn from_column(value: &str) -> Self
	{
		if value == Self::ACTIVE {
			Self::Active
		} else {
			Self::Inactive
		}
	}
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User
{
	/// The user's ID.
	pub id: UserID,

	/// The user's display name.
	pub name: String,

	/// The user's email address.
	pub email: String,

	/// The user's access level.
	pub role: Role,

	/// Whether the account is still active.
	pub status: AccountStatus,
}

/// A product listed by some user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product
{
	/// The product's ID.
	pub id: ProductID,

	/// The product's title.
	pub title: String,

	/// The product's price.
	pub price: f64,

	/// The ID of the user who listed this product.
	pub user_id: UserID,
}

/// An order placed by some user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order
{
	/// The order's ID.
	pub id: OrderID,

	/// The ID of the user who placed this order.
	pub user_id: UserID,

	/// The total price of the order.
	pub total_price: f64,

	/// The order's status, e.g. `active` or `purchased`.
	pub status: String,
}
