//! Interactive three-legged OAuth 1.0a walkthrough for X (Twitter).
//!
//! The demo reads consumer credentials from `X_CONSUMER_KEY`, `X_CONSUMER_SECRET`, and
//! `X_CALLBACK_URL` (falling back to prompts), prints the authorize URL, waits for the user to
//! paste the returned `oauth_token` and `oauth_verifier`, and can send a tweet so the access token
//! is exercised end-to-end.

// std
use std::{
	io::{self, Write},
	sync::Arc,
};
// crates.io
use color_eyre::Result;
use serde_json::{self, json};
use url::Url;
// self
use oauth1_broker::{
	auth::{AccessTokenRecord, PrincipalId},
	config::ConsumerConfig,
	ext::RequestSignerExt,
	flows::ReqwestBroker,
	provider::ProviderDescriptor,
	reqwest::Client,
	store::{BrokerStore, MemoryStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = match ConsumerConfig::from_env("X") {
		Ok(config) => config,
		Err(_) => prompt_config()?,
	};
	let store: Arc<dyn BrokerStore> = Arc::new(MemoryStore::default());
	let broker = ReqwestBroker::new(store, ProviderDescriptor::x()?, config);
	let principal = PrincipalId::new("user-1729")?;
	let session = broker.start_authorization(principal.clone()).await?;

	println!("Authorize URL: {}", &session.authorize_url);
	println!("Request token expires at {}.", session.expires_at);
	println!(
		"After X redirects back to your app, copy the `oauth_token` and `oauth_verifier` query parameters and paste them here."
	);

	let returned_token = prompt_with_default(
		"oauth_token (press Enter to reuse the issued value)",
		Some(session.token()),
	)?;
	let verifier = prompt_optional("oauth_verifier (leave blank to skip the live exchange)")?;

	if let Some(verifier) = verifier {
		let record = broker.complete_authorization(&returned_token, &verifier).await?;

		println!("Access token: {}", record.credentials.token);
		println!("Linked account fields: {:?}", record.extra);

		let tweet_prompt = prompt_optional(
			"Tweet text (leave blank to skip posting to https://api.x.com/2/tweets)",
		)?;

		if let Some(text) = tweet_prompt {
			post_tweet(&broker, &record, &text).await?;
		} else {
			println!("Tweet skipped; access token exchange confirmed.");
		}

		return Ok(());
	}

	println!("Verifier not provided; skipping access token exchange.");
	println!(
		"The pending session stays in the store until Broker::complete_authorization receives the callback."
	);

	Ok(())
}

fn prompt_config() -> Result<ConsumerConfig> {
	let consumer_key = prompt_with_default("Enter your X consumer key", Some("demo-x-consumer"))?;
	let consumer_secret = prompt_with_default("Enter your X consumer secret", None)?;
	let callback = prompt_with_default(
		"Enter the callback URL registered with X",
		Some("https://app.example.com/x/callback"),
	)?;

	Ok(ConsumerConfig::new(consumer_key, consumer_secret, Url::parse(&callback)?)?)
}

fn prompt_with_default(message: &str, default: Option<&str>) -> Result<String> {
	loop {
		if let Some(value) = default {
			print!("{message} [{value}]: ");
		} else {
			print!("{message}: ");
		}

		io::stdout().flush()?;

		let mut input = String::new();

		io::stdin().read_line(&mut input)?;

		let trimmed = input.trim();

		if trimmed.is_empty() {
			if let Some(value) = default {
				return Ok(value.to_owned());
			}
		} else {
			return Ok(trimmed.to_owned());
		}
	}
}

fn prompt_optional(message: &str) -> Result<Option<String>> {
	print!("{message}: ");

	io::stdout().flush()?;

	let mut input = String::new();

	io::stdin().read_line(&mut input)?;

	let trimmed = input.trim();

	if trimmed.is_empty() { Ok(None) } else { Ok(Some(trimmed.to_owned())) }
}

async fn post_tweet(broker: &ReqwestBroker, record: &AccessTokenRecord, text: &str) -> Result<()> {
	let client = Client::new();

	println!("Posting tweet: {text}");

	let payload = serde_json::to_string(&json!({ "text": text }))?;
	let request = client
		.post("https://api.x.com/2/tweets")
		.header("content-type", "application/json")
		.body(payload)
		.build()?;
	let request = broker.attach_token(request, record)?;
	let response = client.execute(request).await?;
	let status = response.status();
	let body = response.text().await?;

	println!("Tweet response ({status}): {body}");

	Ok(())
}
