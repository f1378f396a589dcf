//! Shared helpers for flow implementations (signed token requests, response parsing).

// self
use crate::{
	_prelude::*,
	auth::TokenCredentials,
	flows::Broker,
	http::{TokenHttpClient, TokenResponse},
	sign::{ProtocolParams, SigningRequest},
};

const TOKEN_FIELD: &str = "oauth_token";
const TOKEN_SECRET_FIELD: &str = "oauth_token_secret";
const CALLBACK_CONFIRMED_FIELD: &str = "oauth_callback_confirmed";

/// Signs and sends a `POST` to a token endpoint, returning the decoded response fields.
///
/// Endpoint query parameters participate in the signature and stay on the sent URL.
pub(crate) async fn post_signed<C>(
	broker: &Broker<C>,
	endpoint: &Url,
	protocol: ProtocolParams,
	token_secret: Option<&str>,
) -> Result<BTreeMap<String, String>>
where
	C: ?Sized + TokenHttpClient,
{
	let mut request =
		SigningRequest::from_request_url("POST", endpoint, broker.config.consumer_secret.expose())?
			.with_parameters(protocol.into_parameters());

	if let Some(secret) = token_secret {
		request = request.with_token_secret(secret);
	}

	let signed = request.sign()?;
	let response = broker.http_client.post_form(endpoint, &signed.authorization, &[]).await?;

	parse_token_response(response)
}

/// Maps a raw token endpoint response onto its form fields or a broker error.
pub(crate) fn parse_token_response(response: TokenResponse) -> Result<BTreeMap<String, String>> {
	if !response.is_success() {
		return Err(Error::ProviderRejected { status: response.status, body: response.body });
	}

	Ok(url::form_urlencoded::parse(response.body.as_bytes()).into_owned().collect())
}

/// Removes `oauth_token` + `oauth_token_secret` from `fields`.
pub(crate) fn take_credentials(fields: &mut BTreeMap<String, String>) -> Result<TokenCredentials> {
	let token = take_required(fields, TOKEN_FIELD)?;
	let secret = take_required(fields, TOKEN_SECRET_FIELD)?;

	Ok(TokenCredentials::new(token, secret))
}

/// Ensures the provider acknowledged `oauth_callback` (RFC 5849 §2.1).
pub(crate) fn ensure_callback_confirmed(fields: &mut BTreeMap<String, String>) -> Result<()> {
	match fields.remove(CALLBACK_CONFIRMED_FIELD).as_deref() {
		Some("true") => Ok(()),
		Some(other) => Err(Error::MalformedResponse {
			reason: format!("`{CALLBACK_CONFIRMED_FIELD}` is `{other}`, expected `true`"),
		}),
		None => Err(Error::MalformedResponse {
			reason: format!("missing `{CALLBACK_CONFIRMED_FIELD}`"),
		}),
	}
}

fn take_required(fields: &mut BTreeMap<String, String>, name: &str) -> Result<String> {
	match fields.remove(name) {
		Some(value) if !value.is_empty() => Ok(value),
		_ => Err(Error::MalformedResponse { reason: format!("missing `{name}`") }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16, body: &str) -> TokenResponse {
		TokenResponse { status, body: body.into() }
	}

	#[test]
	fn non_success_status_surfaces_body() {
		let err = parse_token_response(response(401, "Invalid signature"))
			.expect_err("401 responses should be rejected.");

		assert!(matches!(
			err,
			Error::ProviderRejected { status: 401, ref body } if body == "Invalid signature"
		));
	}

	#[test]
	fn credentials_are_taken_and_extras_remain() {
		let mut fields = parse_token_response(response(
			200,
			"oauth_token=6253282-eWudHldSbIaelX7swmsiHImEL4KinwaGloHANdrY&oauth_token_secret=2EEfA6BG5ly3sR3XjE0IBSnlQu4ZrUzPiYTmrkVU&user_id=6253282&screen_name=twitterapi",
		))
		.expect("Successful response should parse.");
		let credentials = take_credentials(&mut fields).expect("Credentials should be present.");

		assert_eq!(credentials.token, "6253282-eWudHldSbIaelX7swmsiHImEL4KinwaGloHANdrY");
		assert_eq!(credentials.secret.expose(), "2EEfA6BG5ly3sR3XjE0IBSnlQu4ZrUzPiYTmrkVU");
		assert_eq!(fields.len(), 2);
		assert_eq!(fields.get("screen_name").map(String::as_str), Some("twitterapi"));
	}

	#[test]
	fn missing_or_empty_secret_is_malformed() {
		for body in ["oauth_token=abc", "oauth_token=abc&oauth_token_secret="] {
			let mut fields =
				parse_token_response(response(200, body)).expect("Body should decode.");
			let err = take_credentials(&mut fields).expect_err("Secret is required.");

			assert!(matches!(err, Error::MalformedResponse { .. }));
		}
	}

	#[test]
	fn callback_confirmation_must_be_true() {
		let mut confirmed = BTreeMap::from([(CALLBACK_CONFIRMED_FIELD.into(), "true".into())]);
		let mut denied = BTreeMap::from([(CALLBACK_CONFIRMED_FIELD.into(), "false".into())]);

		assert!(ensure_callback_confirmed(&mut confirmed).is_ok());
		assert!(confirmed.is_empty());
		assert!(matches!(
			ensure_callback_confirmed(&mut denied),
			Err(Error::MalformedResponse { .. })
		));
		assert!(matches!(
			ensure_callback_confirmed(&mut BTreeMap::new()),
			Err(Error::MalformedResponse { .. })
		));
	}
}
