// self
use crate::{
	_prelude::*,
	auth::ProviderId,
	provider::{ProviderDescriptor, ProviderEndpoints, ProviderQuirks},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProviderDescriptorError {
	/// Request-token endpoint is mandatory.
	#[error("Missing request token endpoint.")]
	MissingRequestTokenEndpoint,
	/// Authorization endpoint is mandatory.
	#[error("Missing authorize endpoint.")]
	MissingAuthorizeEndpoint,
	/// Access-token endpoint is mandatory.
	#[error("Missing access token endpoint.")]
	MissingAccessTokenEndpoint,
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Signed endpoints must not carry a fragment.
	#[error("The {endpoint} endpoint must not contain a fragment: {url}.")]
	FragmentInEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Pending request tokens need a positive lifetime.
	#[error("Request token TTL must be positive.")]
	NonPositiveRequestTokenTtl,
	/// A built-in preset failed to assemble.
	#[error("Built-in provider preset is invalid.")]
	InvalidPreset,
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Identifier for the descriptor being constructed.
	pub id: ProviderId,
	/// Temporary-credential endpoint.
	pub request_token_endpoint: Option<Url>,
	/// Resource-owner authorization endpoint.
	pub authorize_endpoint: Option<Url>,
	/// Token-credential endpoint.
	pub access_token_endpoint: Option<Url>,
	/// Provider-specific quirks.
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			request_token_endpoint: None,
			authorize_endpoint: None,
			access_token_endpoint: None,
			quirks: ProviderQuirks::default(),
		}
	}

	/// Sets the request-token endpoint.
	pub fn request_token_endpoint(mut self, url: Url) -> Self {
		self.request_token_endpoint = Some(url);

		self
	}

	/// Sets the authorize endpoint.
	pub fn authorize_endpoint(mut self, url: Url) -> Self {
		self.authorize_endpoint = Some(url);

		self
	}

	/// Sets the access-token endpoint.
	pub fn access_token_endpoint(mut self, url: Url) -> Self {
		self.access_token_endpoint = Some(url);

		self
	}

	/// Overrides the provider quirks.
	pub fn quirks(mut self, quirks: ProviderQuirks) -> Self {
		self.quirks = quirks;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let request_token = self
			.request_token_endpoint
			.ok_or(ProviderDescriptorError::MissingRequestTokenEndpoint)?;
		let authorize =
			self.authorize_endpoint.ok_or(ProviderDescriptorError::MissingAuthorizeEndpoint)?;
		let access_token = self
			.access_token_endpoint
			.ok_or(ProviderDescriptorError::MissingAccessTokenEndpoint)?;
		let descriptor = ProviderDescriptor {
			id: self.id,
			endpoints: ProviderEndpoints { request_token, authorize, access_token },
			quirks: self.quirks,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ProviderDescriptorError> {
		validate_endpoint("request_token", &self.endpoints.request_token)?;
		validate_endpoint("authorize", &self.endpoints.authorize)?;
		validate_endpoint("access_token", &self.endpoints.access_token)?;

		if !self.quirks.request_token_ttl.is_positive() {
			return Err(ProviderDescriptorError::NonPositiveRequestTokenTtl);
		}

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	if url.scheme() != "https" {
		return Err(ProviderDescriptorError::InsecureEndpoint {
			endpoint: name,
			url: url.to_string(),
		});
	}
	if url.fragment().is_some() {
		return Err(ProviderDescriptorError::FragmentInEndpoint {
			endpoint: name,
			url: url.to_string(),
		});
	}

	Ok(())
}
