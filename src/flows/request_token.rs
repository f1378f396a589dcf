//! First leg of the handshake: temporary credentials plus the authorize redirect.
//!
//! [`Broker::start_authorization`] signs a `POST` to the request-token endpoint with
//! `oauth_callback` set, validates the provider's answer, and parks the resulting
//! [`AuthorizationSession`] in the store until the callback arrives.

// self
use crate::{
	_prelude::*,
	auth::PrincipalId,
	flows::{AuthorizationSession, Broker, common},
	http::TokenHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan, FlowStage},
	sign::ProtocolParams,
};

impl<C> Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Obtains a request token and returns the session the caller redirects the user with.
	pub async fn start_authorization(&self, principal: PrincipalId) -> Result<AuthorizationSession> {
		const STAGE: FlowStage = FlowStage::StartAuthorization;
		const KIND: FlowKind = STAGE.kind();

		let span = FlowSpan::new(STAGE);

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result: Result<AuthorizationSession> = span
			.instrument(async move {
				let protocol = ProtocolParams::new(&self.config.consumer_key)
					.callback(self.config.callback_url.as_str());
				let issued_at = OffsetDateTime::now_utc();
				let mut fields = common::post_signed(
					self,
					&self.descriptor.endpoints.request_token,
					protocol,
					None,
				)
				.await?;
				let request_token = common::take_credentials(&mut fields)?;

				if self.descriptor.quirks.callback_confirmation_required {
					common::ensure_callback_confirmed(&mut fields)?;
				}

				let session =
					AuthorizationSession::new(&self.descriptor, principal, request_token, issued_at);

				self.store.save_pending(session.clone()).await?;

				Ok(session)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
