//! The token exchange: request construction, dispatch, and response classification.
//!
//! [`fetch_token`] is the single code path behind every public entry point. It builds one
//! `POST` to the service's token endpoint, hands it to a [`TokenHttpClient`] handle, and turns
//! the body into an [`AccessToken`] or [`Error::TokenNotReceived`]. Transport failures are
//! routed through a [`TransportErrorMapper`] so custom transports keep their own error types.

pub use oauth2;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use serde_json::{Map, Value};
use url::form_urlencoded::Serializer;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Credentials, TokenResponse},
	correlation::CorrelationId,
	error::{ConfigError, TransportError},
	http::{ResponseMetadata, ResponseMetadataSlot, TokenHttpClient},
	obs::{self, TokenOutcome, TokenSpan},
	service::ServiceDescriptor,
};

/// Service name header.
pub const WM_SVC_NAME: &str = "WM_SVC.NAME";
/// Service version header.
pub const WM_SVC_VERSION: &str = "WM_SVC.VERSION";
/// Per-request correlation header.
pub const WM_QOS_CORRELATION_ID: &str = "WM_QOS.CORRELATION_ID";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_ACCEPT: &str = "application/json";
const GRANT_TYPE: &str = "client_credentials";

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	fn map_transport_error(
		&self,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		_metadata: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(*inner),
			other => map_common_transport_error(other),
		}
	}
}

/// Maps the transport-agnostic [`HttpClientError`] variants.
///
/// Custom mappers can delegate here after handling their own `Reqwest(_)` payload.
pub fn map_common_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::Network { source: inner }.into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) =>
			TransportError::Network { source: message.into() }.into(),
		_ => TransportError::Network { source: "Unrecognized HTTP client failure.".into() }
			.into(),
	}
}

/// Performs one `client_credentials` exchange and returns the issued access token.
///
/// No retries are attempted and nothing is cached; every call sends exactly one request with
/// a freshly generated correlation id.
pub async fn fetch_token<C, M>(
	http_client: &C,
	mapper: &M,
	service: &ServiceDescriptor,
	credentials: &Credentials,
) -> Result<AccessToken>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let correlation_id = CorrelationId::generate();
	let span = TokenSpan::new("exchange", Some(&correlation_id));

	obs::record_token_outcome(TokenOutcome::Attempt);

	let result = span
		.instrument(async {
			let request = build_token_request(service, credentials, &correlation_id)?;
			let slot = ResponseMetadataSlot::default();
			let handle = http_client.with_metadata(slot.clone());
			let response = handle
				.call(request)
				.await
				.map_err(|err| mapper.map_transport_error(slot.take().as_ref(), err))?;

			parse_token_response(Some(response.status().as_u16()), response.body())
		})
		.await;

	match &result {
		Ok(_) => obs::record_token_outcome(TokenOutcome::Success),
		Err(_) => obs::record_token_outcome(TokenOutcome::Failure),
	}

	result
}

/// Builds the token endpoint request for `credentials`.
pub fn build_token_request(
	service: &ServiceDescriptor,
	credentials: &Credentials,
	correlation_id: &CorrelationId,
) -> Result<HttpRequest> {
	let body = Serializer::new(String::new()).append_pair("grant_type", GRANT_TYPE).finish();
	let request = Request::builder()
		.method(Method::POST)
		.uri(service.token_endpoint.as_str())
		.header(AUTHORIZATION, credentials.basic_authorization())
		.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
		.header(ACCEPT, JSON_ACCEPT)
		.header(WM_SVC_NAME, service.service_name.as_str())
		.header(WM_QOS_CORRELATION_ID, correlation_id.to_string())
		.header(WM_SVC_VERSION, service.service_version.as_str())
		.body(body.into_bytes())
		.map_err(ConfigError::from)?;

	Ok(request)
}

/// Classifies a token endpoint body.
///
/// The body is read regardless of `status`. Anything other than a JSON object carrying a
/// non-empty string `access_token` yields [`Error::TokenNotReceived`].
pub fn parse_token_response(status: Option<u16>, body: &[u8]) -> Result<AccessToken> {
	let not_received = |source| Error::TokenNotReceived { status, source };
	let mut de = serde_json::Deserializer::from_slice(body);
	let object: Map<String, Value> =
		serde_path_to_error::deserialize(&mut de).map_err(|e| not_received(Some(e)))?;

	de.end().map_err(|_| not_received(None))?;

	let response: TokenResponse = serde_path_to_error::deserialize(Value::Object(object))
		.map_err(|e| not_received(Some(e)))?;

	response.into_access_token().ok_or_else(|| not_received(None))
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::from(err).into()
}
