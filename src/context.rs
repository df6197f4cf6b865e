//! The per-request [`RequestContext`].
//!
//! Each stage of a guarded route reads from and writes to one
//! [`RequestContext`], which lives in the request's [extensions] between
//! stages. The first stage creates it from the request headers; later stages
//! fill in the session principal and the resources that are being accessed.
//!
//! Handlers can take a [`RequestContext`] as an [extractor] to read what the
//! pipeline resolved.
//!
//! [extensions]: axum::http::Extensions
//! [extractor]: axum::extract

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request, HeaderMap};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};

use crate::guards::GuardError;
use crate::models::{Order, Product, User};

/// Everything the guards know about the current request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext
{
	/// The raw token from the `Authorization: Bearer …` header.
	pub bearer_token: Option<String>,

	/// The authenticated user, set by [`ProtectSession`].
	///
	/// [`ProtectSession`]: crate::guards::ProtectSession
	pub session: Option<User>,

	/// The user account that is being accessed.
	pub target_user: Option<User>,

	/// The product that is being accessed.
	pub product: Option<Product>,

	/// The order that is being accessed.
	pub order: Option<Order>,
}

impl RequestContext
{
	/// Creates a fresh context from request headers.
	///
	/// A malformed `Authorization` header, or one that uses any scheme other
	/// than `Bearer`, is treated the same as a missing one. The scheme is
	/// matched exactly and must be followed by a single space.
	pub fn from_headers(headers: &HeaderMap) -> Self
	{
		let bearer_token = headers
			.typed_get::<Authorization<Bearer>>()
			.filter(|_| has_exact_bearer_prefix(headers))
			.map(|header| header.token().to_owned())
			.filter(|token| !token.is_empty());

		Self { bearer_token, ..Self::default() }
	}

	/// Returns the request's context, creating it if no stage has run yet.
	pub fn get_or_create<B>(req: &mut axum::http::Request<B>) -> &mut Self
	{
		if req.extensions().get::<Self>().is_none() {
			let context = Self::from_headers(req.headers());
			req.extensions_mut().insert(context);
		}

		req.extensions_mut().get_or_insert_default::<Self>()
	}

	/// Takes the request's context out of its extensions, creating it if no
	/// stage has run yet.
	pub fn take<B>(req: &mut axum::http::Request<B>) -> Self
	{
		match req.extensions_mut().remove::<Self>() {
			Some(context) => context,
			None => Self::from_headers(req.headers()),
		}
	}

	/// Returns the session principal.
	pub fn session(&self) -> Result<&User, GuardError>
	{
		self.session
			.as_ref()
			.ok_or(GuardError::MissingContext { what: "session principal" })
	}

	/// Returns the target user.
	pub fn target_user(&self) -> Result<&User, GuardError>
	{
		self.target_user
			.as_ref()
			.ok_or(GuardError::MissingContext { what: "target user" })
	}

	/// Returns the product.
	pub fn product(&self) -> Result<&Product, GuardError>
	{
		self.product
			.as_ref()
			.ok_or(GuardError::MissingContext { what: "product" })
	}

	/// Returns the order.
	pub fn order(&self) -> Result<&Order, GuardError>
	{
		self.order
			.as_ref()
			.ok_or(GuardError::MissingContext { what: "order" })
	}
}

/// Checks that the raw `Authorization` header reads `Bearer <token>`.
///
/// [`Authorization<Bearer>`] accepts any casing of the scheme and skips extra
/// whitespace before the token, neither of which we allow.
fn has_exact_bearer_prefix(headers: &HeaderMap) -> bool
{
	headers
		.get(header::AUTHORIZATION)
		.and_then(|value| value.as_bytes().strip_prefix(b"Bearer "))
		.is_some_and(|token| token.first() != Some(&b' '))
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
	S: Send + Sync,
{
	type Rejection = GuardError;

	async fn from_request_parts(
		parts: &mut request::Parts,
		_state: &S,
	) -> Result<Self, Self::Rejection>
	{
		parts
			.extensions
			.get::<Self>()
			.cloned()
			.ok_or(GuardError::MissingContext { what: "request context" })
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	fn headers(authorization: &str) -> color_eyre::Result<HeaderMap>
	{
		let mut headers = HeaderMap::new();
		headers.insert(header::AUTHORIZATION, authorization.parse()?);
		Ok(headers)
	}

	#[test]
	fn extracts_bearer_token() -> color_eyre::Result<()>
	{
		let context = RequestContext::from_headers(&headers("Bearer abc.def.ghi")?);

		testing::assert_eq!(context.bearer_token.as_deref(), Some("abc.def.ghi"));
		testing::assert!(context.session.is_none());

		Ok(())
	}

	#[test]
	fn ignores_other_schemes() -> color_eyre::Result<()>
	{
		let basic = RequestContext::from_headers(&headers("Basic dXNlcjpwYXNz")?);
		let bare = RequestContext::from_headers(&headers("abc.def.ghi")?);
		let missing = RequestContext::from_headers(&HeaderMap::new());

		testing::assert!(basic.bearer_token.is_none());
		testing::assert!(bare.bearer_token.is_none());
		testing::assert!(missing.bearer_token.is_none());

		Ok(())
	}

	#[test]
	fn scheme_must_match_exactly() -> color_eyre::Result<()>
	{
		for authorization in ["bearer abc.def.ghi", "BEARER abc.def.ghi", "Bearer  abc.def.ghi"] {
			let context = RequestContext::from_headers(&headers(authorization)?);

			testing::assert!(context.bearer_token.is_none(), "accepted `{authorization}`");
		}

		Ok(())
	}

	#[test]
	fn get_or_create_keeps_existing_context() -> color_eyre::Result<()>
	{
		let mut req = axum::http::Request::builder()
			.header(header::AUTHORIZATION, "Bearer first")
			.body(())?;

		RequestContext::get_or_create(&mut req).session = Some(testing::user(1, "normal"));

		let context = RequestContext::take(&mut req);

		testing::assert_eq!(context.bearer_token.as_deref(), Some("first"));
		testing::assert!(context.session.is_some());
		testing::assert!(req.extensions().get::<RequestContext>().is_none());

		Ok(())
	}

	#[test]
	fn missing_entities_are_reported() -> color_eyre::Result<()>
	{
		let context = RequestContext::default();

		testing::assert_matches!(
			context.order(),
			Err(GuardError::MissingContext { what: "order" })
		);

		Ok(())
	}
}
