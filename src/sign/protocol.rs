//! OAuth protocol parameter assembly (nonce, timestamp, and the `oauth_*` set).

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{_prelude::*, sign::params::Parameters};

/// Literal `oauth_signature_method` value emitted by the signer.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Literal `oauth_version` value.
pub const OAUTH_VERSION: &str = "1.0";

const NONCE_LEN: usize = 32;

/// Signature methods understood by the signer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureMethod {
	/// HMAC-SHA1 over the signature base string (RFC 5849 §3.4.2).
	#[default]
	HmacSha1,
}
impl SignatureMethod {
	/// Returns the RFC 5849 identifier for the method.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureMethod::HmacSha1 => SIGNATURE_METHOD,
		}
	}
}
impl Display for SignatureMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Per-request OAuth protocol parameters.
///
/// A fresh value stamps a new nonce and the current UTC timestamp. Nonce uniqueness across
/// requests is the caller's responsibility; the generator draws from the thread-local CSPRNG.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolParams {
	/// `oauth_consumer_key`.
	pub consumer_key: String,
	/// `oauth_nonce`.
	pub nonce: String,
	/// `oauth_timestamp`, whole seconds since the Unix epoch.
	pub timestamp: i64,
	/// `oauth_signature_method`.
	pub method: SignatureMethod,
	/// `oauth_callback`, sent only when requesting a temporary credential.
	pub callback: Option<String>,
	/// `oauth_token`, the request or access token being used.
	pub token: Option<String>,
	/// `oauth_verifier`, sent only when exchanging for an access token.
	pub verifier: Option<String>,
}
impl ProtocolParams {
	/// Starts a parameter set with a fresh nonce and the current timestamp.
	pub fn new(consumer_key: impl Into<String>) -> Self {
		Self {
			consumer_key: consumer_key.into(),
			nonce: generate_nonce(),
			timestamp: OffsetDateTime::now_utc().unix_timestamp(),
			method: SignatureMethod::default(),
			callback: None,
			token: None,
			verifier: None,
		}
	}

	/// Overrides the generated nonce.
	pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
		self.nonce = nonce.into();

		self
	}

	/// Overrides the generated timestamp.
	pub fn with_timestamp(mut self, timestamp: i64) -> Self {
		self.timestamp = timestamp;

		self
	}

	/// Sets `oauth_callback`.
	pub fn callback(mut self, callback: impl Into<String>) -> Self {
		self.callback = Some(callback.into());

		self
	}

	/// Sets `oauth_token`.
	pub fn token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(token.into());

		self
	}

	/// Sets `oauth_verifier`.
	pub fn verifier(mut self, verifier: impl Into<String>) -> Self {
		self.verifier = Some(verifier.into());

		self
	}

	/// Flattens the set into signer [`Parameters`].
	pub fn into_parameters(self) -> Parameters {
		let mut params = Parameters::new()
			.with("oauth_consumer_key", self.consumer_key)
			.with("oauth_nonce", self.nonce)
			.with("oauth_signature_method", self.method.as_str())
			.with("oauth_timestamp", self.timestamp.to_string())
			.with("oauth_version", OAUTH_VERSION);

		if let Some(callback) = self.callback {
			params.insert("oauth_callback", callback);
		}
		if let Some(token) = self.token {
			params.insert("oauth_token", token);
		}
		if let Some(verifier) = self.verifier {
			params.insert("oauth_verifier", verifier);
		}

		params
	}
}

/// Generates a 32-character alphanumeric nonce.
pub fn generate_nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::sign::ParamValue;

	#[test]
	fn nonces_are_alphanumeric_and_fresh() {
		let first = generate_nonce();
		let second = generate_nonce();

		assert_eq!(first.len(), NONCE_LEN);
		assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(first, second);
	}

	#[test]
	fn parameters_include_only_configured_optionals() {
		let params = ProtocolParams::new("consumer")
			.with_nonce("nonce")
			.with_timestamp(1_700_000_000)
			.callback("https://app.example.com/callback")
			.into_parameters();

		assert_eq!(params.get("oauth_consumer_key").and_then(ParamValue::as_str), Some("consumer"));
		assert_eq!(params.get("oauth_timestamp").and_then(ParamValue::as_str), Some("1700000000"));
		assert_eq!(
			params.get("oauth_signature_method").and_then(ParamValue::as_str),
			Some("HMAC-SHA1")
		);
		assert_eq!(params.get("oauth_version").and_then(ParamValue::as_str), Some("1.0"));
		assert!(params.contains_key("oauth_callback"));
		assert!(!params.contains_key("oauth_token"));
		assert!(!params.contains_key("oauth_verifier"));
		assert_eq!(params.len(), 6);
	}
}
