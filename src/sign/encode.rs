//! RFC 3986 percent-encoding and scalar parameter values.

// std
use std::borrow::Cow;
// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;
// self
use crate::_prelude::*;

/// Everything outside the RFC 3986 unreserved set (`A-Za-z0-9-._~`).
const OAUTH_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Errors raised while turning request inputs into their canonical signed form.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum EncodingError {
	/// A parameter value was `null`, an array, or an object.
	#[error("Parameter `{key}` holds a non-scalar {kind} value.")]
	NonScalar {
		/// Parameter name carrying the offending value.
		key: String,
		/// JSON kind of the offending value.
		kind: &'static str,
	},
	/// The base URL carried a query, fragment, or userinfo component.
	#[error("Base URL must contain only scheme, host, and path: {url}.")]
	InvalidBaseUrl {
		/// URL that failed validation.
		url: String,
	},
	/// The HTTP method is not a plain alphabetic token.
	#[error("HTTP method `{method}` is not a valid token.")]
	InvalidMethod {
		/// Method that failed validation.
		method: String,
	},
	/// A formatted header could not be represented as an HTTP header value.
	#[error("Header `{name}` holds bytes that are not valid in an HTTP header.")]
	InvalidHeaderValue {
		/// Header name.
		name: &'static str,
	},
}

/// Percent-encodes `input` as RFC 5849 §3.6 requires.
///
/// Unreserved characters pass through, every other UTF-8 byte becomes `%XX` with uppercase
/// hex digits. Spaces are always `%20`.
pub fn percent_encode(input: &str) -> String {
	utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Parameter value accepted by the signer.
///
/// Values are modelled on JSON scalars so callers can feed loosely typed payloads (form bodies,
/// JSON request descriptions) through the same path. Only strings, numbers, and booleans have a
/// canonical text form; anything else is rejected when encoded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamValue(Value);
impl ParamValue {
	/// Returns the canonical text form of the value.
	pub fn as_text(&self, key: &str) -> Result<Cow<'_, str>, EncodingError> {
		match &self.0 {
			Value::String(text) => Ok(Cow::Borrowed(text)),
			Value::Number(number) => Ok(Cow::Owned(number.to_string())),
			Value::Bool(true) => Ok(Cow::Borrowed("true")),
			Value::Bool(false) => Ok(Cow::Borrowed("false")),
			other => Err(EncodingError::NonScalar { key: key.to_owned(), kind: kind_of(other) }),
		}
	}

	/// Returns `true` when the value has a canonical text form.
	pub fn is_scalar(&self) -> bool {
		matches!(self.0, Value::String(_) | Value::Number(_) | Value::Bool(_))
	}

	/// Returns the raw string when the value is a JSON string.
	pub fn as_str(&self) -> Option<&str> {
		self.0.as_str()
	}
}
impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self(Value::String(value.to_owned()))
	}
}
impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self(Value::String(value))
	}
}
impl From<&String> for ParamValue {
	fn from(value: &String) -> Self {
		Self(Value::String(value.clone()))
	}
}
impl From<i64> for ParamValue {
	fn from(value: i64) -> Self {
		Self(Value::from(value))
	}
}
impl From<u64> for ParamValue {
	fn from(value: u64) -> Self {
		Self(Value::from(value))
	}
}
impl From<bool> for ParamValue {
	fn from(value: bool) -> Self {
		Self(Value::Bool(value))
	}
}
impl From<Value> for ParamValue {
	fn from(value: Value) -> Self {
		Self(value)
	}
}

fn kind_of(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
		Value::String(_) => "string",
		Value::Number(_) => "number",
		Value::Bool(_) => "boolean",
	}
}
