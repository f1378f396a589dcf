//! Storage contracts and built-in store implementations for pending sessions and access tokens.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{AccessTokenRecord, PrincipalId, ProviderId},
	flows::AuthorizationSession,
};

/// Future returned by [`BrokerStore`] calls.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract implemented by broker stores.
pub trait BrokerStore
where
	Self: Send + Sync,
{
	/// Persists a pending session keyed by its request token, replacing any previous entry.
	///
	/// Implementations drop pending sessions that have already expired while saving.
	fn save_pending(&self, session: AuthorizationSession) -> StoreFuture<'_, ()>;

	/// Removes and returns the pending session for `request_token`, if present.
	fn take_pending<'a>(
		&'a self,
		request_token: &'a str,
	) -> StoreFuture<'a, Option<AuthorizationSession>>;

	/// Persists or replaces the access-token record for the record's provider + principal.
	fn save(&self, record: AccessTokenRecord) -> StoreFuture<'_, ()>;

	/// Fetches the record linked to the provider + principal, if present.
	fn fetch<'a>(
		&'a self,
		provider: &'a ProviderId,
		principal: &'a PrincipalId,
	) -> StoreFuture<'a, Option<AccessTokenRecord>>;

	/// Marks a record as revoked at the provided instant.
	fn revoke<'a>(
		&'a self,
		provider: &'a ProviderId,
		principal: &'a PrincipalId,
		instant: OffsetDateTime,
	) -> StoreFuture<'a, Option<AccessTokenRecord>>;
}

/// Error type produced by [`BrokerStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Unique key identifying a stored access-token record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreKey {
	/// Provider component.
	pub provider: ProviderId,
	/// Principal component.
	pub principal: PrincipalId,
}
impl StoreKey {
	/// Builds a key for the provided provider + principal.
	pub fn new(provider: &ProviderId, principal: &PrincipalId) -> Self {
		Self { provider: provider.clone(), principal: principal.clone() }
	}

	/// Builds the key under which `record` is stored.
	pub fn for_record(record: &AccessTokenRecord) -> Self {
		Self::new(&record.provider, &record.principal)
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;
	use crate::{auth::TokenCredentials, error::Error};

	#[test]
	fn store_error_converts_into_broker_error_with_source() {
		let store_error = StoreError::Backend { message: "database unreachable".into() };
		let broker_error: Error = store_error.clone().into();

		assert!(matches!(broker_error, Error::Storage(_)));
		assert!(broker_error.to_string().contains("database unreachable"));

		let source = StdError::source(&broker_error)
			.expect("Broker error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn store_key_matches_record_identity() {
		let provider = ProviderId::new("x-com").expect("Provider fixture should be valid.");
		let principal = PrincipalId::new("auth0|7").expect("Principal fixture should be valid.");
		let record = AccessTokenRecord::new(
			provider.clone(),
			principal.clone(),
			TokenCredentials::new("token", "secret"),
		);

		assert_eq!(StoreKey::for_record(&record), StoreKey::new(&provider, &principal));
	}
}
