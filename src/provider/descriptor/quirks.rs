// self
use crate::_prelude::*;

/// Provider-specific quirks that influence how flows behave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderQuirks {
	/// Requires `oauth_callback_confirmed=true` in the request-token response (OAuth 1.0a).
	pub callback_confirmation_required: bool,
	/// How long a pending request token may wait for the authorization callback.
	pub request_token_ttl: Duration,
}
impl Default for ProviderQuirks {
	fn default() -> Self {
		Self { callback_confirmation_required: true, request_token_ttl: Duration::minutes(15) }
	}
}
