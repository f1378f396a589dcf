//! Three-legged OAuth 1.0a handshake orchestrated by the broker facade.

pub mod common;
pub mod session;

mod access_token;
mod request_token;

pub use session::*;

// self
use crate::{
	_prelude::*, config::ConsumerConfig, http::TokenHttpClient, provider::ProviderDescriptor,
	store::BrokerStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Broker specialized for the crate's default reqwest transport stack.
pub type ReqwestBroker = Broker<ReqwestHttpClient>;

/// Coordinates the OAuth 1.0a handshake against a single provider descriptor.
///
/// The broker owns the HTTP client, store, provider descriptor, and consumer configuration so
/// individual flow steps can focus on the protocol (request token, verifier exchange, protected
/// resource signing). Every outbound call is signed with the consumer secret from
/// [`ConsumerConfig`] plus whichever token secret the step requires.
pub struct Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Store that persists pending sessions and issued access tokens.
	pub store: Arc<dyn BrokerStore>,
	/// Provider descriptor that defines OAuth endpoints and quirks.
	pub descriptor: ProviderDescriptor,
	/// Consumer credentials and callback URL.
	pub config: ConsumerConfig,
}
impl<C> Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a broker that reuses the caller-provided transport.
	pub fn with_http_client(
		store: Arc<dyn BrokerStore>,
		descriptor: ProviderDescriptor,
		config: ConsumerConfig,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { http_client: http_client.into(), store, descriptor, config }
	}
}
#[cfg(feature = "reqwest")]
impl Broker<ReqwestHttpClient> {
	/// Creates a new broker for the provided descriptor and consumer configuration.
	///
	/// The broker provisions its own reqwest-backed transport so callers do not need to pass
	/// HTTP handles explicitly.
	pub fn new(
		store: Arc<dyn BrokerStore>,
		descriptor: ProviderDescriptor,
		config: ConsumerConfig,
	) -> Self {
		Self::with_http_client(store, descriptor, config, ReqwestHttpClient::default())
	}
}
impl<C> Clone for Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			store: self.store.clone(),
			descriptor: self.descriptor.clone(),
			config: self.config.clone(),
		}
	}
}
impl<C> Debug for Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Broker")
			.field("descriptor", &self.descriptor)
			.field("consumer_key", &self.config.consumer_key)
			.field("callback_url", &self.config.callback_url)
			.finish()
	}
}
