//! Consumer credentials and callback configuration.
//!
//! [`ConsumerConfig`] is passed explicitly into the broker; nothing in the crate reads the
//! process environment on its own. [`ConsumerConfig::from_env`] exists for binaries that want
//! the conventional `<PREFIX>_CONSUMER_KEY` layout.

// std
use std::env;
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Application credentials registered with an OAuth 1.0a provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerConfig {
	/// Public consumer key (`oauth_consumer_key`).
	pub consumer_key: String,
	/// Consumer secret; first half of every signing key.
	pub consumer_secret: TokenSecret,
	/// Absolute URL the provider redirects to after the user authorizes.
	pub callback_url: Url,
}
impl ConsumerConfig {
	/// Validates and assembles a configuration.
	pub fn new(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
		callback_url: Url,
	) -> Result<Self, ConfigError> {
		let config = Self {
			consumer_key: consumer_key.into(),
			consumer_secret: TokenSecret::new(consumer_secret),
			callback_url,
		};

		config.validate()?;

		Ok(config)
	}

	/// Parses a JSON document, reporting the path of the first invalid field.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let de = &mut serde_json::Deserializer::from_str(json);
		let config: Self = serde_path_to_error::deserialize(de)?;

		config.validate()?;

		Ok(config)
	}

	/// Reads `<PREFIX>_CONSUMER_KEY`, `<PREFIX>_CONSUMER_SECRET`, and `<PREFIX>_CALLBACK_URL`.
	pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
		Self::from_lookup(prefix, |var| env::var(var).ok())
	}

	fn from_lookup(
		prefix: &str,
		lookup: impl Fn(&str) -> Option<String>,
	) -> Result<Self, ConfigError> {
		let read = |suffix: &str| {
			let var = format!("{prefix}_{suffix}");

			lookup(&var).ok_or(ConfigError::MissingEnv { var })
		};
		let consumer_key = read("CONSUMER_KEY")?;
		let consumer_secret = read("CONSUMER_SECRET")?;
		let callback_url = Url::parse(&read("CALLBACK_URL")?)
			.map_err(|source| ConfigError::InvalidUrl { field: "callback", source })?;

		Self::new(consumer_key, consumer_secret, callback_url)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.consumer_key.trim().is_empty() {
			return Err(ConfigError::EmptyConsumerKey);
		}

		Ok(())
	}
}
