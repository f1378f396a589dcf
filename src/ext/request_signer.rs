//! Request signing contracts that let downstream crates attach broker-issued access tokens to
//! arbitrary HTTP clients.

// crates.io
#[cfg(feature = "reqwest")]
use reqwest::{
	Request,
	header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue},
};
// self
use crate::auth::AccessTokenRecord;
#[cfg(feature = "reqwest")]
use crate::{
	_prelude::*,
	flows::Broker,
	http::{FORM_CONTENT_TYPE, TokenHttpClient},
	sign::EncodingError,
};

/// Describes how to attach an [`AccessTokenRecord`] to an outbound request without
/// constraining the HTTP client type.
///
/// OAuth 1.0a signatures cover the method, URL, and form body, so implementations must sign the
/// request as it will be sent.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the provided request and injects an `Authorization` header derived from the
	/// [`AccessTokenRecord`].
	fn attach_token(&self, request: Request, record: &AccessTokenRecord) -> Result<Request, Error>;
}

#[cfg(feature = "reqwest")]
impl<C> RequestSignerExt<Request, Error> for Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn attach_token(&self, mut request: Request, record: &AccessTokenRecord) -> Result<Request> {
		let form = form_fields(&request);
		let authorization =
			self.authorization_header(record, request.method().as_str(), request.url(), &form)?;
		let value = HeaderValue::from_str(&authorization)
			.map_err(|_| EncodingError::InvalidHeaderValue { name: "authorization" })?;

		request.headers_mut().insert(AUTHORIZATION, value);

		Ok(request)
	}
}

/// Decodes the body when it is `application/x-www-form-urlencoded`; other bodies are not signed.
#[cfg(feature = "reqwest")]
fn form_fields(request: &Request) -> Vec<(String, String)> {
	let is_form = request
		.headers()
		.get(CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.split(';').next())
		.is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE));

	if !is_form {
		return Vec::new();
	}

	request
		.body()
		.and_then(|body| body.as_bytes())
		.map(|bytes| url::form_urlencoded::parse(bytes).into_owned().collect())
		.unwrap_or_default()
}
