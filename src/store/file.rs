//! Simple file-backed [`BrokerStore`] for lightweight deployments and bots.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessTokenRecord, PrincipalId, ProviderId},
	flows::AuthorizationSession,
	store::{BrokerStore, StoreError, StoreFuture, StoreKey},
};

#[derive(Debug, Default)]
struct FileState {
	pending: HashMap<String, AuthorizationSession>,
	records: HashMap<StoreKey, AccessTokenRecord>,
}

#[derive(Default, Serialize, Deserialize)]
struct Snapshot {
	#[serde(default)]
	pending: Vec<AuthorizationSession>,
	#[serde(default)]
	records: Vec<AccessTokenRecord>,
}

/// Persists pending sessions and access-token records to a JSON file after each mutation.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<FileState>>,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let state = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(state)) })
	}

	/// Location of the JSON snapshot.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<FileState, StoreError> {
		if !path.exists() {
			return Ok(FileState::default());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		if bytes.is_empty() {
			return Ok(FileState::default());
		}

		let snapshot: Snapshot =
			serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
				message: format!("Failed to parse {}: {e}", path.display()),
			})?;

		Ok(FileState {
			pending: snapshot
				.pending
				.into_iter()
				.map(|session| (session.token().to_owned(), session))
				.collect(),
			records: snapshot
				.records
				.into_iter()
				.map(|record| (StoreKey::for_record(&record), record))
				.collect(),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist_locked(&self, state: &FileState) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let snapshot = Snapshot {
			pending: state.pending.values().cloned().collect(),
			records: state.records.values().cloned().collect(),
		};
		let serialized =
			serde_json::to_vec_pretty(&snapshot).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize store snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl BrokerStore for FileStore {
	fn save_pending(&self, session: AuthorizationSession) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let now = OffsetDateTime::now_utc();
			let mut guard = self.inner.write();

			guard.pending.retain(|_, pending| !pending.is_expired_at(now));
			guard.pending.insert(session.token().to_owned(), session);
			self.persist_locked(&guard)
		})
	}

	fn take_pending<'a>(
		&'a self,
		request_token: &'a str,
	) -> StoreFuture<'a, Option<AuthorizationSession>> {
		Box::pin(async move {
			let mut guard = self.inner.write();
			let session = guard.pending.remove(request_token);

			if session.is_some() {
				self.persist_locked(&guard)?;
			}

			Ok(session)
		})
	}

	fn save(&self, record: AccessTokenRecord) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			guard.records.insert(StoreKey::for_record(&record), record);
			self.persist_locked(&guard)
		})
	}

	fn fetch<'a>(
		&'a self,
		provider: &'a ProviderId,
		principal: &'a PrincipalId,
	) -> StoreFuture<'a, Option<AccessTokenRecord>> {
		Box::pin(async move {
			let key = StoreKey::new(provider, principal);

			Ok(self.inner.read().records.get(&key).cloned())
		})
	}

	fn revoke<'a>(
		&'a self,
		provider: &'a ProviderId,
		principal: &'a PrincipalId,
		instant: OffsetDateTime,
	) -> StoreFuture<'a, Option<AccessTokenRecord>> {
		Box::pin(async move {
			let key = StoreKey::new(provider, principal);
			let mut guard = self.inner.write();
			let revoked = match guard.records.get_mut(&key) {
				Some(record) => {
					record.revoke(instant);

					Some(record.clone())
				},
				None => None,
			};

			if revoked.is_some() {
				self.persist_locked(&guard)?;
			}

			Ok(revoked)
		})
	}
}
