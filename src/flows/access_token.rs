//! Third leg of the handshake plus signing with the issued access token.

// self
use crate::{
	_prelude::*,
	auth::{AccessTokenRecord, PrincipalId},
	flows::{AuthorizationSession, Broker, common},
	http::TokenHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan, FlowStage},
	sign::{ProtocolParams, SigningRequest},
};

impl<C> Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Handles the authorization callback by consuming the pending session for `oauth_token`.
	///
	/// A token with no pending session (unknown, already used, or issued to another broker) is
	/// refused with [`Error::InvalidCallback`].
	pub async fn complete_authorization(
		&self,
		oauth_token: &str,
		oauth_verifier: &str,
	) -> Result<AccessTokenRecord> {
		let session = self
			.store
			.take_pending(oauth_token)
			.await?
			.ok_or_else(|| Error::InvalidCallback { reason: "unknown request token".into() })?;

		self.exchange_verifier(session, oauth_token, oauth_verifier).await
	}

	/// Exchanges the verifier for token credentials and persists the resulting record.
	pub async fn exchange_verifier(
		&self,
		session: AuthorizationSession,
		oauth_token: &str,
		oauth_verifier: &str,
	) -> Result<AccessTokenRecord> {
		const STAGE: FlowStage = FlowStage::ExchangeVerifier;
		const KIND: FlowKind = STAGE.kind();

		let span = FlowSpan::new(STAGE);

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result: Result<AccessTokenRecord> = span
			.instrument(async move {
				self.ensure_session_usable(&session, oauth_token, oauth_verifier)?;

				let protocol = ProtocolParams::new(&self.config.consumer_key)
					.token(session.token())
					.verifier(oauth_verifier);
				let mut fields = common::post_signed(
					self,
					&self.descriptor.endpoints.access_token,
					protocol,
					Some(session.request_token.secret.expose()),
				)
				.await?;
				let credentials = common::take_credentials(&mut fields)?;
				let record =
					AccessTokenRecord::new(session.provider, session.principal, credentials)
						.with_extra(fields);

				self.store.save(record.clone()).await?;

				Ok(record)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	/// Builds the `Authorization` header for a protected-resource request.
	///
	/// `url` may carry a query string; its parameters and the decoded `form` body fields are
	/// signed alongside the protocol parameters.
	pub fn authorization_header(
		&self,
		record: &AccessTokenRecord,
		method: &str,
		url: &Url,
		form: &[(String, String)],
	) -> Result<String> {
		const STAGE: FlowStage = FlowStage::AuthorizationHeader;
		const KIND: FlowKind = STAGE.kind();

		let _guard = FlowSpan::new(STAGE).entered();

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = self.sign_with_record(record, method, url, form);

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	/// Fetches the access-token record linked to `principal` for this provider.
	pub async fn linked_account(&self, principal: &PrincipalId) -> Result<Option<AccessTokenRecord>> {
		Ok(self.store.fetch(&self.descriptor.id, principal).await?)
	}

	/// Marks the principal's access token as revoked in the store.
	///
	/// Only the local record changes; the provider is not contacted.
	pub async fn revoke(&self, principal: &PrincipalId) -> Result<Option<AccessTokenRecord>> {
		let now = OffsetDateTime::now_utc();

		Ok(self.store.revoke(&self.descriptor.id, principal, now).await?)
	}

	fn ensure_session_usable(
		&self,
		session: &AuthorizationSession,
		oauth_token: &str,
		oauth_verifier: &str,
	) -> Result<()> {
		session.validate_token(oauth_token)?;

		if session.provider != self.descriptor.id {
			return Err(Error::InvalidCallback {
				reason: format!("session belongs to provider `{}`", session.provider),
			});
		}
		if session.is_expired_at(OffsetDateTime::now_utc()) {
			return Err(Error::InvalidCallback { reason: "request token expired".into() });
		}
		if oauth_verifier.is_empty() {
			return Err(Error::InvalidCallback { reason: "missing `oauth_verifier`".into() });
		}

		Ok(())
	}

	fn sign_with_record(
		&self,
		record: &AccessTokenRecord,
		method: &str,
		url: &Url,
		form: &[(String, String)],
	) -> Result<String> {
		if record.is_revoked() {
			return Err(Error::Revoked);
		}

		let protocol =
			ProtocolParams::new(&self.config.consumer_key).token(&record.credentials.token);
		let mut request =
			SigningRequest::from_request_url(method, url, self.config.consumer_secret.expose())?
				.with_token_secret(record.credentials.secret.expose())
				.with_parameters(protocol.into_parameters());

		request.parameters.extend(form.iter().map(|(key, value)| (key.as_str(), value.as_str())));

		Ok(request.sign()?.authorization)
	}
}
