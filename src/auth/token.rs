//! Token credential pairs and the access-token records persisted per principal.

// self
use crate::{
	_prelude::*,
	auth::{PrincipalId, ProviderId, TokenSecret},
};

/// Token plus its shared secret, as issued by the request- or access-token endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCredentials {
	/// Public token value sent as `oauth_token`.
	pub token: String,
	/// Shared secret used as the second half of the signing key.
	pub secret: TokenSecret,
}
impl TokenCredentials {
	/// Pairs a token with its secret.
	pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { token: token.into(), secret: TokenSecret::new(secret) }
	}
}
impl Debug for TokenCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenCredentials")
			.field("token", &self.token)
			.field("secret", &"<redacted>")
			.finish()
	}
}

/// Lifecycle status for an access-token record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// Usable for signing requests.
	Active,
	/// Revoked locally or by the provider.
	Revoked,
}

/// Access-token credentials linked to a principal.
///
/// OAuth 1.0a access tokens carry no expiry; they stay valid until revoked.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessTokenRecord {
	/// Provider that minted the credentials.
	pub provider: ProviderId,
	/// Principal the account is linked to.
	pub principal: PrincipalId,
	/// Access token and secret.
	pub credentials: TokenCredentials,
	/// Additional response fields (`user_id`, `screen_name`, ...).
	pub extra: BTreeMap<String, String>,
	/// Instant the access-token exchange completed.
	pub issued_at: OffsetDateTime,
	/// Revocation instant if the record has been revoked.
	pub revoked_at: Option<OffsetDateTime>,
}
impl AccessTokenRecord {
	/// Creates an active record stamped with the current clock.
	pub fn new(provider: ProviderId, principal: PrincipalId, credentials: TokenCredentials) -> Self {
		Self {
			provider,
			principal,
			credentials,
			extra: BTreeMap::new(),
			issued_at: OffsetDateTime::now_utc(),
			revoked_at: None,
		}
	}

	/// Overrides the issued-at instant.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = instant;

		self
	}

	/// Attaches additional response fields.
	pub fn with_extra(mut self, extra: BTreeMap<String, String>) -> Self {
		self.extra = extra;

		self
	}

	/// Returns the record status.
	pub fn status(&self) -> TokenStatus {
		if self.revoked_at.is_some() { TokenStatus::Revoked } else { TokenStatus::Active }
	}

	/// Returns `true` if the record has been revoked.
	pub fn is_revoked(&self) -> bool {
		self.revoked_at.is_some()
	}

	/// Marks the record as revoked.
	pub fn revoke(&mut self, instant: OffsetDateTime) {
		self.revoked_at = Some(instant);
	}
}
#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn record() -> AccessTokenRecord {
		AccessTokenRecord::new(
			ProviderId::new("x-com").expect("Provider fixture should be valid."),
			PrincipalId::new("auth0|1").expect("Principal fixture should be valid."),
			TokenCredentials::new("370773112-token", "access-secret"),
		)
		.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
	}

	#[test]
	fn revoke_flips_status() {
		let mut record = record();

		assert_eq!(record.status(), TokenStatus::Active);

		record.revoke(macros::datetime!(2025-01-02 00:00 UTC));

		assert_eq!(record.status(), TokenStatus::Revoked);
		assert!(record.is_revoked());
	}

	#[test]
	fn debug_output_redacts_secret() {
		let rendered = format!("{:?}", record());

		assert!(rendered.contains("370773112-token"));
		assert!(!rendered.contains("access-secret"));
	}
}
