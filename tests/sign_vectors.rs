// crates.io
use serde_json::json;
// self
use oauth1_broker::{
	sign::{
		self, EncodingError, Parameters, ProtocolParams, SIGNATURE_PARAM, SigningRequest,
		percent_encode,
	},
	url::Url,
};

fn url(value: &str) -> Url {
	Url::parse(value).expect("Fixture URL should parse.")
}

fn photos_request() -> SigningRequest {
	SigningRequest::new("GET", url("http://photos.example.net/photos"), "kd94hf93k423kf44")
		.expect("Photos request should build.")
		.with_token_secret("pfkkdhi9sl3r4s00")
		.parameter("file", "vacation.jpg")
		.parameter("size", "original")
		.with_parameters(
			ProtocolParams::new("dpf43f3p2l4k3l03")
				.token("nnch734d00sl2jdk")
				.with_nonce("kllo9940pd9333jh")
				.with_timestamp(1_191_242_096)
				.into_parameters(),
		)
}

#[test]
fn oauth_core_appendix_a5_vector_reproduces() {
	let request = photos_request();

	assert_eq!(
		request.base_string().expect("Base string should build."),
		"GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg%26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096%26oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal"
	);
	assert_eq!(
		sign::compute_signature(&request).expect("Signature should compute."),
		"tR3+Ty81lMeYAr/Fid0kMTYa/WM="
	);
}

#[test]
fn rfc5849_initiate_vector_reproduces() {
	let mut parameters = ProtocolParams::new("dpf43f3p2l4k3l03")
		.with_nonce("wIjqoS")
		.with_timestamp(137_131_200)
		.callback("http://printer.example.com/ready")
		.into_parameters();

	// The RFC example omits `oauth_version`.
	parameters.remove("oauth_version");

	let request =
		SigningRequest::new("post", url("https://photos.example.net/initiate"), "kd94hf93k423kf44")
			.expect("Initiate request should build.")
			.with_parameters(parameters);

	assert_eq!(
		sign::compute_signature(&request).expect("Signature should compute."),
		"74KNZJeDHnMBp0EMJ9ZHt/XKycU="
	);
}

#[test]
fn twitter_documentation_vector_reproduces() {
	let request = SigningRequest::new(
		"post",
		url("https://api.twitter.com/1.1/statuses/update.json"),
		"kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
	)
	.expect("Status update request should build.")
	.with_token_secret("LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE")
	.parameter("status", "Hello Ladies + Gentlemen, a signed OAuth request!")
	.parameter("include_entities", true)
	.with_parameters(
		ProtocolParams::new("xvz1evFS4wEEPTGEFPHBog")
			.token("370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb")
			.with_nonce("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg")
			.with_timestamp(1_318_622_958)
			.into_parameters(),
	);
	let signed = request.sign().expect("Request should sign.");

	assert_eq!(signed.signature, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
	assert!(signed.authorization.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
	assert!(!signed.authorization.contains("status="));
}

#[test]
fn signatures_are_deterministic() {
	let request = photos_request();
	let first = sign::compute_signature(&request).expect("First signature should compute.");
	let second = sign::compute_signature(&request.clone()).expect("Second signature should compute.");

	assert_eq!(first, second);
}

#[test]
fn percent_encoding_follows_unreserved_set() {
	assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
	assert_eq!(percent_encode("~unreserved.-_"), "~unreserved.-_");
	assert_eq!(percent_encode("An encoded string!"), "An%20encoded%20string%21");
	assert_eq!(percent_encode("é"), "%C3%A9");
}

#[test]
fn parameter_order_is_by_encoded_key_then_value() {
	let mut params: Parameters = [("b", "2"), ("a2", "3"), ("a", "1")].into_iter().collect();

	assert_eq!(sign::parameter_string(&params).expect("Parameters should encode."), "a=1&a2=3&b=2");

	params.append("a", "0");

	assert_eq!(
		sign::parameter_string(&params).expect("Repeated keys should encode."),
		"a=0&a=1&a2=3&b=2"
	);
}

#[test]
fn header_formatting_is_idempotent_and_escapes_signature() {
	let mut params = ProtocolParams::new("key")
		.with_nonce("nonce")
		.with_timestamp(1)
		.into_parameters();

	params.insert(SIGNATURE_PARAM, "a+b/c=");

	let first = sign::build_authorization_header(&params).expect("Header should format.");
	let second = sign::build_authorization_header(&params).expect("Header should format again.");

	assert_eq!(first, second);
	assert!(first.starts_with("OAuth oauth_consumer_key=\"key\", oauth_nonce=\"nonce\""));
	assert!(first.contains("oauth_signature=\"a%2Bb%2Fc%3D\""));
}

#[test]
fn non_scalar_values_raise_encoding_errors() {
	for value in [json!(null), json!({ "nested": true }), json!([1, 2])] {
		let request = SigningRequest::new("POST", url("https://api.x.com/2/tweets"), "secret")
			.expect("Request should build.")
			.parameter("payload", value);

		assert!(matches!(
			sign::compute_signature(&request),
			Err(EncodingError::NonScalar { ref key, .. }) if key == "payload"
		));
	}
}
