//! Stateful and stateless entry points over [`exchange::fetch_token`].
//!
//! [`TokenFetcher`] stores a credential pair, a service descriptor, and a transport so callers
//! can ask for tokens repeatedly. [`fetch_token`] is the one-shot equivalent. Both share the
//! exchange code path, so neither caches, retries, or keeps state between calls.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Credentials, TokenRequest},
	exchange::{self, TransportErrorMapper},
	http::TokenHttpClient,
	obs::{self, TokenSpan},
	service::ServiceDescriptor,
};
#[cfg(feature = "reqwest")]
use crate::{error::ConfigError, exchange::ReqwestTransportErrorMapper, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Fetcher specialized for the crate's default reqwest transport stack.
pub type ReqwestTokenFetcher = TokenFetcher<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Legacy URL/method pair accepted by [`TokenFetcher::from_parts`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
	/// URL of the API call the token is meant for.
	pub request_url: String,
	/// HTTP method of the API call the token is meant for.
	pub request_method: String,
}

/// Obtains access tokens for a single credential pair.
///
/// The fetcher is `Send + Sync` and holds no mutable state, so one instance can serve
/// concurrent callers behind an `Arc`.
#[derive(Clone)]
pub struct TokenFetcher<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Token service endpoint, headers, and timeout.
	pub service: ServiceDescriptor,
	/// Consumer id + private key sent as HTTP Basic credentials.
	pub credentials: Credentials,
	/// Legacy request context recorded by [`TokenFetcher::get_token`]; never transmitted.
	pub request_context: RequestContext,
}
impl<C, M> TokenFetcher<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a fetcher that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		credentials: Credentials,
		service: ServiceDescriptor,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			service,
			credentials,
			request_context: RequestContext::default(),
		}
	}

	/// Sets the legacy request URL and method.
	pub fn with_request_context(
		mut self,
		request_url: impl Into<String>,
		request_method: impl Into<String>,
	) -> Self {
		self.request_context =
			RequestContext { request_url: request_url.into(), request_method: request_method.into() };

		self
	}

	/// Resolves the legacy [`TokenRequest`] for `timestamp`.
	///
	/// Numeric timestamps are kept; absent or non-numeric ones default to the current time.
	pub fn token_request(&self, timestamp: Option<&str>) -> TokenRequest {
		TokenRequest::new(
			self.request_context.request_url.clone(),
			self.request_context.request_method.clone(),
		)
		.with_timestamp(timestamp)
	}

	/// Requests a new access token with the stored credentials.
	///
	/// `timestamp` only feeds the traced [`TokenRequest`]; the token endpoint never sees it.
	/// The exchange span is nested under this call's `get_token` span.
	///
	/// Synchronous callers can drive the future on a current-thread runtime:
	///
	/// ```no_run
	/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
	/// use walmart_marketplace_auth::{Credentials, TokenFetcher};
	///
	/// let fetcher = TokenFetcher::new(Credentials::new("consumer-id", "private-key"))?;
	/// let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
	/// let token = runtime.block_on(fetcher.get_token(None))?;
	///
	/// println!("Bearer {}", token.expose());
	/// # Ok(())
	/// # }
	/// ```
	pub async fn get_token(&self, timestamp: Option<&str>) -> Result<AccessToken> {
		let request = self.token_request(timestamp);

		TokenSpan::new("get_token", None)
			.instrument(async {
				obs::record_request_context(&request);

				self.fetch().await
			})
			.await
	}

	/// Requests a new access token without touching the legacy context.
	pub async fn fetch(&self) -> Result<AccessToken> {
		exchange::fetch_token(
			self.http_client.as_ref(),
			self.transport_mapper.as_ref(),
			&self.service,
			&self.credentials,
		)
		.await
	}
}
#[cfg(feature = "reqwest")]
impl TokenFetcher<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a fetcher for the production endpoint with a TLS-verifying reqwest client.
	pub fn new(credentials: Credentials) -> Result<Self> {
		let service = ServiceDescriptor::production().map_err(ConfigError::from)?;

		Self::for_service(credentials, service)
	}

	/// Creates a fetcher for `service` with a TLS-verifying reqwest client.
	pub fn for_service(credentials: Credentials, service: ServiceDescriptor) -> Result<Self> {
		let http_client = ReqwestHttpClient::for_service(&service)?;

		Ok(Self::with_http_client(
			credentials,
			service,
			http_client,
			Arc::new(ReqwestTransportErrorMapper),
		))
	}

	/// Creates a fetcher from the four values accepted by legacy integrations.
	///
	/// `request_url` and `request_method` are kept as traced context only.
	pub fn from_parts(
		consumer_id: impl Into<String>,
		private_key: impl Into<String>,
		request_url: impl Into<String>,
		request_method: impl Into<String>,
	) -> Result<Self> {
		Ok(Self::new(Credentials::new(consumer_id, private_key))?
			.with_request_context(request_url, request_method))
	}
}
impl<C, M> Debug for TokenFetcher<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenFetcher")
			.field("service", &self.service)
			.field("consumer_id", &self.credentials.consumer_id.as_str())
			.field("request_context", &self.request_context)
			.finish()
	}
}

/// Fetches a token for `credentials` from the production endpoint in one call.
#[cfg(feature = "reqwest")]
pub async fn fetch_token(credentials: &Credentials) -> Result<AccessToken> {
	let service = ServiceDescriptor::production().map_err(ConfigError::from)?;
	let http_client = ReqwestHttpClient::for_service(&service)?;

	exchange::fetch_token(&http_client, &ReqwestTransportErrorMapper, &service, credentials).await
}
