//! OAuth 1.0a request signing (RFC 5849 §3) with HMAC-SHA1.
//!
//! Everything here is pure and synchronous: no clocks, no I/O, no shared state. The handshake
//! flows build a [`SigningRequest`] per outbound call, sign it, and discard it. The intermediate
//! artifacts ([`parameter_string`], [`signature_base_string`], [`signing_key`]) are public so
//! callers can diff them against a provider's debugging output when a signature is rejected.

pub mod encode;
pub mod params;
pub mod protocol;

pub use encode::*;
pub use params::*;
pub use protocol::*;

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
// self
use crate::{_prelude::*, auth::TokenSecret};

type HmacSha1 = Hmac<Sha1>;

/// Name of the parameter carrying the computed signature.
pub const SIGNATURE_PARAM: &str = "oauth_signature";

const PROTOCOL_PREFIX: &str = "oauth_";

/// Inputs for a single signature computation.
#[derive(Clone, Debug)]
pub struct SigningRequest {
	/// HTTP method; uppercased in the base string.
	pub method: String,
	/// Scheme, host, and path of the request URL.
	pub base_url: Url,
	/// Protocol, query, and form parameters.
	pub parameters: Parameters,
	/// Consumer secret; first half of the signing key.
	pub consumer_secret: TokenSecret,
	/// Token secret, if a request or access token has been issued.
	pub token_secret: Option<TokenSecret>,
}
impl SigningRequest {
	/// Creates a request for a base URL that carries no query, fragment, or userinfo.
	pub fn new(
		method: impl Into<String>,
		base_url: Url,
		consumer_secret: impl Into<String>,
	) -> Result<Self, EncodingError> {
		let method = method.into();

		validate_method(&method)?;
		validate_base_url(&base_url)?;

		Ok(Self {
			method,
			base_url,
			parameters: Parameters::new(),
			consumer_secret: TokenSecret::new(consumer_secret),
			token_secret: None,
		})
	}

	/// Splits a full request URL into its base URL and query parameters.
	pub fn from_request_url(
		method: impl Into<String>,
		url: &Url,
		consumer_secret: impl Into<String>,
	) -> Result<Self, EncodingError> {
		let mut base_url = url.clone();

		base_url.set_query(None);
		base_url.set_fragment(None);

		let mut request = Self::new(method, base_url, consumer_secret)?;

		request.parameters.extend_from_query(url);

		Ok(request)
	}

	/// Sets the token secret used as the second half of the signing key.
	pub fn with_token_secret(mut self, secret: impl Into<String>) -> Self {
		self.token_secret = Some(TokenSecret::new(secret));

		self
	}

	/// Appends every entry of `parameters`.
	pub fn with_parameters(mut self, parameters: Parameters) -> Self {
		for (key, value) in parameters.iter() {
			self.parameters.append(key, value.clone());
		}

		self
	}

	/// Sets a single parameter, replacing earlier values for the key.
	pub fn parameter(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.parameters.insert(key, value);

		self
	}

	/// Builds the signature base string for this request.
	pub fn base_string(&self) -> Result<String, EncodingError> {
		signature_base_string(&self.method, &self.base_url, &self.parameters)
	}

	/// Signs the request and formats the matching `Authorization` header.
	pub fn sign(&self) -> Result<SignedRequest, EncodingError> {
		let signature = compute_signature(self)?;
		let mut protocol = self.parameters.clone();

		protocol.insert(SIGNATURE_PARAM, signature.as_str());

		let authorization = build_authorization_header(&protocol)?;

		Ok(SignedRequest { signature, authorization })
	}
}

/// Output of [`SigningRequest::sign`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
	/// Base64 HMAC-SHA1 signature.
	pub signature: String,
	/// Full `Authorization` header value, starting with `OAuth `.
	pub authorization: String,
}

/// Computes the base64-encoded HMAC-SHA1 signature for `request`.
pub fn compute_signature(request: &SigningRequest) -> Result<String, EncodingError> {
	let base = request.base_string()?;
	let key = signing_key(
		request.consumer_secret.expose(),
		request.token_secret.as_ref().map(TokenSecret::expose),
	);

	Ok(hmac_sha1_base64(key.as_bytes(), base.as_bytes()))
}

/// Normalizes parameters into the `k=v&k=v` form, skipping `oauth_signature`.
pub fn parameter_string(parameters: &Parameters) -> Result<String, EncodingError> {
	let pairs = parameters.encoded_sorted(|key| key != SIGNATURE_PARAM)?;

	Ok(join_pairs(&pairs, "&", |key, value| format!("{key}={value}")))
}

/// Builds `METHOD&encoded-url&encoded-parameter-string`.
pub fn signature_base_string(
	method: &str,
	base_url: &Url,
	parameters: &Parameters,
) -> Result<String, EncodingError> {
	let params = parameter_string(parameters)?;

	Ok(format!(
		"{}&{}&{}",
		method.to_ascii_uppercase(),
		encode::percent_encode(base_url.as_str()),
		encode::percent_encode(&params),
	))
}

/// Joins the encoded consumer and token secrets; the `&` is kept when no token secret exists.
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
	format!(
		"{}&{}",
		encode::percent_encode(consumer_secret),
		encode::percent_encode(token_secret.unwrap_or_default()),
	)
}

/// Formats the `oauth_*` entries of `parameters` as an `Authorization` header value.
///
/// Non-protocol parameters are dropped; values are percent-encoded and quoted, so a base64
/// signature's `+`, `/`, and `=` always appear as `%2B`, `%2F`, and `%3D`.
pub fn build_authorization_header(parameters: &Parameters) -> Result<String, EncodingError> {
	let pairs = parameters.encoded_sorted(|key| key.starts_with(PROTOCOL_PREFIX))?;

	Ok(format!("OAuth {}", join_pairs(&pairs, ", ", |key, value| format!("{key}=\"{value}\""))))
}

fn join_pairs(
	pairs: &[(String, String)],
	separator: &str,
	render: impl Fn(&str, &str) -> String,
) -> String {
	pairs.iter().map(|(key, value)| render(key, value)).collect::<Vec<_>>().join(separator)
}

fn hmac_sha1_base64(key: &[u8], message: &[u8]) -> String {
	let mut mac = HmacSha1::new_from_slice(key).expect("HMAC can accept keys of any length");

	mac.update(message);

	STANDARD.encode(mac.finalize().into_bytes())
}

fn validate_method(method: &str) -> Result<(), EncodingError> {
	if method.is_empty() || !method.bytes().all(|b| b.is_ascii_alphabetic()) {
		Err(EncodingError::InvalidMethod { method: method.to_owned() })
	} else {
		Ok(())
	}
}

fn validate_base_url(url: &Url) -> Result<(), EncodingError> {
	if url.cannot_be_a_base()
		|| url.query().is_some()
		|| url.fragment().is_some()
		|| !url.username().is_empty()
		|| url.password().is_some()
	{
		Err(EncodingError::InvalidBaseUrl { url: url.to_string() })
	} else {
		Ok(())
	}
}
