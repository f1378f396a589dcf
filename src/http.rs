//! Transport primitives for OAuth 1.0a token endpoint calls.
//!
//! The module exposes [`TokenHttpClient`], the broker's only dependency on an HTTP stack, and
//! [`TokenResponse`], the raw status plus body handed back to the flows. The flows own every
//! protocol decision (signing, status mapping, body parsing); transports only move bytes.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
// self
use crate::{_prelude::*, error::TransportError};

/// Future returned by [`TokenHttpClient`] calls.
pub type TransportFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Content type of token endpoint request and response bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Raw token endpoint response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body decoded as text.
	pub body: String,
}
impl TokenResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Abstraction over HTTP transports capable of calling OAuth 1.0a token endpoints.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared across
/// broker clones, and the returned futures must be `Send` so flows can hop executors.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends a `POST` with the given `Authorization` header and form body.
	///
	/// `url` is the full endpoint URL, query string included. Non-2xx responses are returned as
	/// values; only failures to obtain a response at all become [`TransportError`].
	fn post_form<'a>(
		&'a self,
		url: &'a Url,
		authorization: &'a str,
		form: &'a [(String, String)],
	) -> TransportFuture<'a, TokenResponse>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token endpoints answer directly, so a custom [`ReqwestClient`] should not follow redirects;
/// a redirected `POST` would be re-sent without a matching signature.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	fn post_form<'a>(
		&'a self,
		url: &'a Url,
		authorization: &'a str,
		form: &'a [(String, String)],
	) -> TransportFuture<'a, TokenResponse> {
		Box::pin(async move {
			let body = url::form_urlencoded::Serializer::new(String::new())
				.extend_pairs(form.iter())
				.finish();
			let response = self
				.0
				.post(url.clone())
				.header(AUTHORIZATION, authorization)
				.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
				.body(body)
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.text().await?;

			Ok(TokenResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_covers_2xx_only() {
		let response = |status| TokenResponse { status, body: String::new() };

		assert!(response(200).is_success());
		assert!(response(204).is_success());
		assert!(!response(302).is_success());
		assert!(!response(401).is_success());
	}
}
