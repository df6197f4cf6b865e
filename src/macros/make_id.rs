//! This module contains the [`make_id!()`] macro, which will generate the
//! boilerplate for an "ID"-like type.
//!
//! Every table we read from has an integer primary key, and using raw integers
//! makes it easy to compare a user ID against an order ID by accident.
//! [`make_id!()`] generates a distinct wrapper type for each of them.

/// Creates a new "ID" type.
///
/// This will produce a thin wrapper around a `u64`, that implements all the
/// typical traits you'd expect.
///
/// # Example
///
/// ```ignore
/// crate::macros::make_id! {
///     /// Some useful documentation.
///     MyID
/// }
/// ```
macro_rules! make_id {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[repr(transparent)]
		#[derive(
			Debug,
			Clone,
			Copy,
			PartialEq,
			Eq,
			PartialOrd,
			Ord,
			Hash,
			serde::Serialize,
			serde::Deserialize,
			sqlx::Type,
		)]
		#[serde(transparent)]
		#[sqlx(transparent)]
		pub struct $name(pub u64);

		impl std::fmt::Display for $name
		{
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
			{
				std::fmt::Display::fmt(&self.0, f)
			}
		}

		impl From<$name> for u64
		{
			fn from(value: $name) -> Self
			{
				value.0
			}
		}

		impl From<u64> for $name
		{
			fn from(value: u64) -> Self
			{
				Self(value)
			}
		}

		impl std::str::FromStr for $name
		{
			type Err = std::num::ParseIntError;

			fn from_str(s: &str) -> std::result::Result<Self, Self::Err>
			{
				s.parse::<u64>().map(Self)
			}
		}
	};
}

pub(crate) use make_id;
