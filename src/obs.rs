//! Optional observability helpers for broker flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth1_broker.flow` with the `flow`
//!   (handshake leg) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `oauth1_broker_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// OAuth 1.0a operations observed by the broker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Temporary-credential request (first leg).
	RequestToken,
	/// Verifier exchange for token credentials (third leg).
	AccessToken,
	/// Signing a protected-resource request with stored credentials.
	SignRequest,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::RequestToken => "request_token",
			FlowKind::AccessToken => "access_token",
			FlowKind::SignRequest => "sign_request",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Broker entry points that open a flow span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowStage {
	/// [`Broker::start_authorization`](crate::flows::Broker::start_authorization).
	StartAuthorization,
	/// [`Broker::exchange_verifier`](crate::flows::Broker::exchange_verifier).
	ExchangeVerifier,
	/// [`Broker::authorization_header`](crate::flows::Broker::authorization_header).
	AuthorizationHeader,
}
impl FlowStage {
	/// Returns a stable label suitable for span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowStage::StartAuthorization => "start_authorization",
			FlowStage::ExchangeVerifier => "exchange_verifier",
			FlowStage::AuthorizationHeader => "authorization_header",
		}
	}

	/// Flow leg the stage belongs to.
	pub const fn kind(self) -> FlowKind {
		match self {
			FlowStage::StartAuthorization => FlowKind::RequestToken,
			FlowStage::ExchangeVerifier => FlowKind::AccessToken,
			FlowStage::AuthorizationHeader => FlowKind::SignRequest,
		}
	}
}
impl Display for FlowStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a broker helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
