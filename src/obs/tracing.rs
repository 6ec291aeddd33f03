// self
use crate::{_prelude::*, auth::TokenRequest, correlation::CorrelationId};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedExchange<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedExchange<F> = F;

/// Span wrapping a token exchange or the `get_token` call around it.
#[derive(Clone, Debug)]
pub struct TokenSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl TokenSpan {
	/// Creates a new span tagged with the provided stage and, when known, the correlation id.
	pub fn new(stage: &'static str, correlation_id: Option<&CorrelationId>) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"walmart_marketplace_auth.token",
				stage,
				correlation_id = correlation_id.map(tracing::field::display)
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, correlation_id);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedExchange<Fut>
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

/// Emits the legacy request context at debug level. It never reaches the wire.
pub fn record_request_context(request: &TokenRequest) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			request_url = %request.request_url,
			request_method = %request.request_method,
			timestamp = request.timestamp,
			"Resolved legacy request context."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = request;
	}
}
