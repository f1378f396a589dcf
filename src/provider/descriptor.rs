//! Provider descriptor data structures and helpers shared by all flows.

/// Builder API for assembling provider descriptors.
pub mod builder;
/// Provider-specific quirk toggles.
pub mod quirks;

pub use builder::*;
pub use quirks::*;

// self
use crate::{_prelude::*, auth::ProviderId};

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Temporary-credential (request token) endpoint.
	pub request_token: Url,
	/// Resource-owner authorization endpoint the user is redirected to.
	pub authorize: Url,
	/// Token-credential (access token) endpoint.
	pub access_token: Url,
}

/// Immutable provider descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Descriptor identifier.
	pub id: ProviderId,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Provider-specific quirks.
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}

	/// Descriptor for X (formerly Twitter) three-legged OAuth 1.0a.
	pub fn x() -> Result<Self, ProviderDescriptorError> {
		let id = ProviderId::new("x-com").map_err(|_| ProviderDescriptorError::InvalidPreset)?;
		let endpoint =
			|raw: &str| Url::parse(raw).map_err(|_| ProviderDescriptorError::InvalidPreset);

		Self::builder(id)
			.request_token_endpoint(endpoint("https://api.x.com/oauth/request_token")?)
			.authorize_endpoint(endpoint("https://api.x.com/oauth/authorize")?)
			.access_token_endpoint(endpoint("https://api.x.com/oauth/access_token")?)
			.build()
	}

	/// Builds the URL the user is sent to for approving `request_token`.
	pub fn authorize_url(&self, request_token: &str) -> Url {
		let mut url = self.endpoints.authorize.clone();

		url.query_pairs_mut().append_pair("oauth_token", request_token);

		url
	}
}
