//! Broker-level error types shared across the signer, flows, and stores.

// self
use crate::_prelude::*;

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Request inputs could not be put into canonical signed form.
	#[error(transparent)]
	Encoding(#[from] crate::sign::EncodingError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Token endpoint answered with a non-success status.
	#[error("Provider rejected the request with HTTP {status}: {body}")]
	ProviderRejected {
		/// HTTP status code.
		status: u16,
		/// Raw response body, kept for diagnostics.
		body: String,
	},
	/// Token endpoint response lacks required credential fields.
	#[error("Token endpoint returned a malformed response: {reason}.")]
	MalformedResponse {
		/// What was missing or inconsistent.
		reason: String,
	},
	/// Authorization callback does not match a live pending session.
	#[error("Authorization callback is invalid: {reason}.")]
	InvalidCallback {
		/// Why the callback was refused.
		reason: String,
	},
	/// Access token has been revoked and must not be reused.
	#[error("Access token has been revoked.")]
	Revoked,
}

/// Configuration and validation failures raised by the broker.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Consumer configuration JSON could not be parsed.
	#[error("Consumer configuration is invalid at `{path}`.")]
	InvalidConfig {
		/// JSON path of the offending field.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Required environment variable is missing or not unicode.
	#[error("Environment variable `{var}` is not set.")]
	MissingEnv {
		/// Variable name.
		var: String,
	},
	/// A configured URL cannot be parsed.
	#[error("Configured {field} URL is invalid.")]
	InvalidUrl {
		/// Which URL failed.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Consumer key is empty.
	#[error("Consumer key cannot be empty.")]
	EmptyConsumerKey,
	/// Identifier validation failed.
	#[error(transparent)]
	Identifier(#[from] crate::auth::IdentifierError),
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::InvalidConfig { path, source: e.into_inner() }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
