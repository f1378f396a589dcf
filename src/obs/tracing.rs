// self
use crate::{
	_prelude::*,
	obs::{FlowKind, FlowStage},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by broker flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the stage and the flow leg it belongs to.
	pub fn new(stage: FlowStage) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oauth1_broker.flow",
				flow = stage.kind().as_str(),
				stage = stage.as_str()
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self {}
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> FlowSpanGuard {
		#[cfg(feature = "tracing")]
		{
			FlowSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			FlowSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// RAII guard returned by [`FlowSpan::entered`].
pub struct FlowSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for FlowSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FlowSpanGuard(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn stages_map_to_their_flow_leg() {
		assert_eq!(FlowStage::StartAuthorization.kind(), FlowKind::RequestToken);
		assert_eq!(FlowStage::ExchangeVerifier.kind(), FlowKind::AccessToken);
		assert_eq!(FlowStage::AuthorizationHeader.kind(), FlowKind::SignRequest);
		assert_eq!(FlowStage::ExchangeVerifier.to_string(), "exchange_verifier");
	}

	#[test]
	fn flow_span_guard_exists_with_or_without_tracing() {
		let _guard = FlowSpan::new(FlowStage::AuthorizationHeader).entered();
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = FlowSpan::new(FlowStage::ExchangeVerifier);
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
