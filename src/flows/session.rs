//! Pending authorization sessions kept between the redirect and the callback.

// self
use crate::{
	_prelude::*,
	auth::{PrincipalId, ProviderId, TokenCredentials},
	provider::ProviderDescriptor,
};

/// Pending handshake returned by [`Broker::start_authorization`](crate::flows::Broker::start_authorization).
///
/// The session is persisted between the authorization redirect and the callback, keyed by the
/// request token, and is consumed exactly once.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthorizationSession {
	/// Principal that started the handshake.
	pub principal: PrincipalId,
	/// Provider the request token was issued by.
	pub provider: ProviderId,
	/// Temporary credentials from the request-token endpoint.
	pub request_token: TokenCredentials,
	/// Fully-formed authorize URL that callers should send end-users to.
	pub authorize_url: Url,
	/// Instant the request token was issued.
	pub issued_at: OffsetDateTime,
	/// Instant after which the callback is refused.
	pub expires_at: OffsetDateTime,
}
impl AuthorizationSession {
	pub(crate) fn new(
		descriptor: &ProviderDescriptor,
		principal: PrincipalId,
		request_token: TokenCredentials,
		issued_at: OffsetDateTime,
	) -> Self {
		let authorize_url = descriptor.authorize_url(&request_token.token);

		Self {
			principal,
			provider: descriptor.id.clone(),
			request_token,
			authorize_url,
			issued_at,
			expires_at: issued_at + descriptor.quirks.request_token_ttl,
		}
	}

	/// Request token value the provider echoes back on the callback.
	pub fn token(&self) -> &str {
		&self.request_token.token
	}

	/// Returns `true` once `now` reaches the session expiry.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		now >= self.expires_at
	}

	/// Validates the `oauth_token` returned by the authorization redirect.
	pub fn validate_token(&self, returned_token: &str) -> Result<()> {
		if returned_token == self.request_token.token {
			Ok(())
		} else {
			Err(Error::InvalidCallback { reason: "request token mismatch".into() })
		}
	}
}
impl Debug for AuthorizationSession {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationSession")
			.field("principal", &self.principal)
			.field("provider", &self.provider)
			.field("request_token", &self.request_token)
			.field("authorize_url", &self.authorize_url)
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
