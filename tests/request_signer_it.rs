#![cfg(feature = "reqwest")]

// std
use std::sync::Arc;
// crates.io
use parking_lot::Mutex;
use percent_encoding::percent_decode_str;
// self
use oauth1_broker::{
	auth::{PrincipalId, TokenCredentials},
	config::ConsumerConfig,
	error::{Error, TransportError},
	ext::RequestSignerExt,
	flows::Broker,
	http::{FORM_CONTENT_TYPE, TokenHttpClient, TokenResponse, TransportFuture},
	provider::ProviderDescriptor,
	reqwest::{
		Client, Method,
		header::{AUTHORIZATION, CONTENT_TYPE},
	},
	sign::{self, Parameters, SIGNATURE_PARAM, SigningRequest},
	store::{BrokerStore, MemoryStore},
	url::Url,
};

const CONSUMER_KEY: &str = "xvz1evFS4wEEPTGEFPHBog";
const CONSUMER_SECRET: &str = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";

#[derive(Clone, Debug)]
struct RecordedCall {
	url: Url,
	authorization: String,
}

#[derive(Default)]
struct RecordingHttpClient {
	responses: Mutex<Vec<TokenResponse>>,
	calls: Mutex<Vec<RecordedCall>>,
}
impl RecordingHttpClient {
	fn with_responses(bodies: &[&str]) -> Self {
		let responses = bodies
			.iter()
			.rev()
			.map(|body| TokenResponse { status: 200, body: (*body).to_owned() })
			.collect();

		Self { responses: Mutex::new(responses), calls: Mutex::default() }
	}

	fn calls(&self) -> Vec<RecordedCall> {
		self.calls.lock().clone()
	}
}
impl TokenHttpClient for RecordingHttpClient {
	fn post_form<'a>(
		&'a self,
		url: &'a Url,
		authorization: &'a str,
		_form: &'a [(String, String)],
	) -> TransportFuture<'a, TokenResponse> {
		Box::pin(async move {
			self.calls
				.lock()
				.push(RecordedCall { url: url.clone(), authorization: authorization.to_owned() });

			self.responses.lock().pop().ok_or_else(|| {
				TransportError::Io(std::io::Error::other("No canned response left."))
			})
		})
	}
}

fn build_broker(client: Arc<RecordingHttpClient>) -> (Broker<RecordingHttpClient>, Arc<MemoryStore>) {
	let store_backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn BrokerStore> = store_backend.clone();
	let descriptor = ProviderDescriptor::x().expect("X preset should build.");
	let callback = Url::parse("https://app.example.com/x/callback")
		.expect("Callback URL should parse successfully.");
	let config = ConsumerConfig::new(CONSUMER_KEY, CONSUMER_SECRET, callback)
		.expect("Consumer config should be valid.");

	(Broker::with_http_client(store, descriptor, config, client), store_backend)
}

fn parse_authorization(header: &str) -> Parameters {
	let fields = header.strip_prefix("OAuth ").expect("Header should use the OAuth scheme.");

	fields
		.split(", ")
		.map(|field| {
			let (key, quoted) = field.split_once('=').expect("Header field should be key=value.");
			let value = quoted
				.strip_prefix('"')
				.and_then(|rest| rest.strip_suffix('"'))
				.expect("Header value should be quoted.");
			let decode = |raw: &str| {
				percent_decode_str(raw)
					.decode_utf8()
					.expect("Header text should be UTF-8.")
					.into_owned()
			};

			(decode(key), decode(value))
		})
		.collect()
}

/// Recomputes the signature a provider would check and compares it with the one sent.
fn assert_valid_signature(
	method: &str,
	url: &Url,
	authorization: &str,
	extra: &[(&str, &str)],
	token_secret: Option<&str>,
) -> Parameters {
	let mut protocol = parse_authorization(authorization);
	let sent = protocol
		.get(SIGNATURE_PARAM)
		.and_then(|value| value.as_str())
		.map(str::to_owned)
		.expect("Header should carry a signature.");

	protocol.remove(SIGNATURE_PARAM);

	let mut request = SigningRequest::from_request_url(method, url, CONSUMER_SECRET)
		.expect("Request URL should split.")
		.with_parameters(protocol.clone());

	request.parameters.extend(extra.iter().copied());

	if let Some(secret) = token_secret {
		request = request.with_token_secret(secret);
	}

	assert_eq!(sign::compute_signature(&request).expect("Signature should recompute."), sent);

	protocol
}

#[tokio::test]
async fn handshake_requests_are_signed_with_the_right_secrets() {
	let client = Arc::new(RecordingHttpClient::with_responses(&[
		"oauth_token=request-token&oauth_token_secret=request-secret&oauth_callback_confirmed=true",
		"oauth_token=access-token&oauth_token_secret=access-secret&screen_name=oauth1_bot",
	]));
	let (broker, _store) = build_broker(client.clone());
	let principal = PrincipalId::new("auth0|signer").expect("Principal fixture should be valid.");
	let session =
		broker.start_authorization(principal).await.expect("Session should start successfully.");
	let record = broker
		.complete_authorization(session.token(), "verifier-xyz")
		.await
		.expect("Verifier exchange should succeed.");
	let calls = client.calls();

	assert_eq!(calls.len(), 2);
	assert_eq!(record.extra.get("screen_name").map(String::as_str), Some("oauth1_bot"));

	let initiate = assert_valid_signature("POST", &calls[0].url, &calls[0].authorization, &[], None);

	assert_eq!(calls[0].url.as_str(), "https://api.x.com/oauth/request_token");
	assert_eq!(
		initiate.get("oauth_callback").and_then(|value| value.as_str()),
		Some("https://app.example.com/x/callback")
	);
	assert!(!initiate.contains_key("oauth_token"));

	let exchange = assert_valid_signature(
		"POST",
		&calls[1].url,
		&calls[1].authorization,
		&[],
		Some("request-secret"),
	);

	assert_eq!(exchange.get("oauth_token").and_then(|value| value.as_str()), Some("request-token"));
	assert_eq!(
		exchange.get("oauth_verifier").and_then(|value| value.as_str()),
		Some("verifier-xyz")
	);
	assert!(!exchange.contains_key("oauth_callback"));
}

#[tokio::test]
async fn attach_token_signs_query_and_form_fields() {
	let (broker, _store) = build_broker(Arc::new(RecordingHttpClient::default()));
	let record = oauth1_broker::auth::AccessTokenRecord::new(
		broker.descriptor.id.clone(),
		PrincipalId::new("auth0|signer").expect("Principal fixture should be valid."),
		TokenCredentials::new("370773112-access", "access-secret"),
	);
	let url = Url::parse("https://api.x.com/1.1/statuses/update.json?include_entities=true")
		.expect("Resource URL should parse.");
	let request = Client::new()
		.request(Method::POST, url.clone())
		.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
		.body("status=Hello%20Ladies%20%2B%20Gentlemen")
		.build()
		.expect("Request should build.");
	let signed = broker.attach_token(request, &record).expect("Request should sign.");
	let authorization = signed
		.headers()
		.get(AUTHORIZATION)
		.and_then(|value| value.to_str().ok())
		.expect("Authorization header should be set.");
	let protocol = assert_valid_signature(
		"POST",
		&url,
		authorization,
		&[("status", "Hello Ladies + Gentlemen")],
		Some("access-secret"),
	);

	assert_eq!(
		protocol.get("oauth_token").and_then(|value| value.as_str()),
		Some("370773112-access")
	);
	assert!(!protocol.contains_key("status"));
	assert!(!protocol.contains_key("include_entities"));
}

#[tokio::test]
async fn revoked_records_cannot_sign() {
	let client = Arc::new(RecordingHttpClient::with_responses(&[
		"oauth_token=request-token&oauth_token_secret=request-secret&oauth_callback_confirmed=true",
		"oauth_token=access-token&oauth_token_secret=access-secret",
	]));
	let (broker, _store) = build_broker(client);
	let principal = PrincipalId::new("auth0|revoked").expect("Principal fixture should be valid.");
	let session = broker
		.start_authorization(principal.clone())
		.await
		.expect("Session should start successfully.");

	broker
		.complete_authorization(session.token(), "verifier")
		.await
		.expect("Verifier exchange should succeed.");

	let revoked = broker
		.revoke(&principal)
		.await
		.expect("Revocation should succeed.")
		.expect("Linked record should exist.");
	let url = Url::parse("https://api.x.com/2/tweets").expect("Resource URL should parse.");
	let err = broker
		.authorization_header(&revoked, "POST", &url, &[])
		.expect_err("Revoked records must not sign.");

	assert!(matches!(err, Error::Revoked));

	let stored = broker
		.linked_account(&principal)
		.await
		.expect("Store lookup should succeed.")
		.expect("Revoked record should remain linked.");

	assert!(stored.is_revoked());
}
