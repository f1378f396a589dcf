//! Thread-safe in-memory [`BrokerStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{AccessTokenRecord, PrincipalId, ProviderId},
	flows::AuthorizationSession,
	store::{BrokerStore, StoreError, StoreFuture, StoreKey},
};

#[derive(Debug, Default)]
struct MemoryState {
	pending: HashMap<String, AuthorizationSession>,
	records: HashMap<StoreKey, AccessTokenRecord>,
}

/// Thread-safe storage backend that keeps sessions and records in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<RwLock<MemoryState>>);
impl MemoryStore {
	/// Number of pending sessions awaiting a callback.
	pub fn pending_len(&self) -> usize {
		self.0.read().pending.len()
	}

	/// Number of stored access-token records.
	pub fn records_len(&self) -> usize {
		self.0.read().records.len()
	}

	fn revoke_now(
		&self,
		key: StoreKey,
		instant: OffsetDateTime,
	) -> Result<Option<AccessTokenRecord>, StoreError> {
		let mut guard = self.0.write();

		Ok(guard.records.get_mut(&key).map(|record| {
			record.revoke(instant);

			record.clone()
		}))
	}
}
impl BrokerStore for MemoryStore {
	fn save_pending(&self, session: AuthorizationSession) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let now = OffsetDateTime::now_utc();
			let mut guard = self.0.write();

			guard.pending.retain(|_, pending| !pending.is_expired_at(now));
			guard.pending.insert(session.token().to_owned(), session);

			Ok(())
		})
	}

	fn take_pending<'a>(
		&'a self,
		request_token: &'a str,
	) -> StoreFuture<'a, Option<AuthorizationSession>> {
		Box::pin(async move { Ok(self.0.write().pending.remove(request_token)) })
	}

	fn save(&self, record: AccessTokenRecord) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			self.0.write().records.insert(StoreKey::for_record(&record), record);

			Ok(())
		})
	}

	fn fetch<'a>(
		&'a self,
		provider: &'a ProviderId,
		principal: &'a PrincipalId,
	) -> StoreFuture<'a, Option<AccessTokenRecord>> {
		Box::pin(async move {
			let key = StoreKey::new(provider, principal);

			Ok(self.0.read().records.get(&key).cloned())
		})
	}

	fn revoke<'a>(
		&'a self,
		provider: &'a ProviderId,
		principal: &'a PrincipalId,
		instant: OffsetDateTime,
	) -> StoreFuture<'a, Option<AccessTokenRecord>> {
		Box::pin(async move { self.revoke_now(StoreKey::new(provider, principal), instant) })
	}
}
