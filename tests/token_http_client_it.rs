// std
use std::{
	collections::HashSet,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use parking_lot::Mutex;
// self
use walmart_marketplace_auth::{
	auth::Credentials,
	error::{Error, Result, TransportError},
	exchange::{
		self, TransportErrorMapper, map_common_transport_error,
		oauth2::{
			AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse, http::StatusCode,
		},
	},
	fetcher::TokenFetcher,
	http::{ResponseMetadata, ResponseMetadataSlot, TokenHttpClient},
	service::ServiceDescriptor,
};

#[derive(Debug)]
enum FakeTransportError {
	ConnectionRefused,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ConnectionRefused => write!(f, "Connection refused."),
		}
	}
}
impl StdError for FakeTransportError {}

#[derive(Clone, Copy)]
enum Reply {
	Body(u16, &'static str),
	Refuse,
}

#[derive(Clone)]
struct RecordingHttpClient {
	reply: Reply,
	requests: Arc<Mutex<Vec<HttpRequest>>>,
}
impl RecordingHttpClient {
	fn replying(status: u16, body: &'static str) -> Self {
		Self { reply: Reply::Body(status, body), requests: Default::default() }
	}

	fn refusing() -> Self {
		Self { reply: Reply::Refuse, requests: Default::default() }
	}

	fn header_values(&self, name: &str) -> Vec<String> {
		self.requests
			.lock()
			.iter()
			.map(|request| {
				request
					.headers()
					.get(name)
					.and_then(|value| value.to_str().ok())
					.expect("Recorded request should carry the header.")
					.to_owned()
			})
			.collect()
	}
}
impl TokenHttpClient for RecordingHttpClient {
	type Handle = RecordingHttpHandle;
	type TransportError = FakeTransportError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		RecordingHttpHandle { client: self.clone(), slot }
	}
}

struct RecordingHttpHandle {
	client: RecordingHttpClient,
	slot: ResponseMetadataSlot,
}
impl<'a> AsyncHttpClient<'a> for RecordingHttpHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		let slot = self.slot.clone();
		let client = self.client.clone();

		Box::pin(async move {
			assert!(
				slot.take().is_none(),
				"ResponseMetadataSlot must be clear before dispatching a request."
			);

			client.requests.lock().push(request);

			match client.reply {
				Reply::Body(status, body) => {
					slot.store(ResponseMetadata { status: Some(status) });

					let mut response = HttpResponse::new(body.as_bytes().to_vec());

					*response.status_mut() =
						StatusCode::from_u16(status).expect("Fake status should be valid.");

					Ok(response)
				},
				Reply::Refuse =>
					Err(HttpClientError::Reqwest(Box::new(FakeTransportError::ConnectionRefused))),
			}
		})
	}
}

#[derive(Clone, Default)]
struct RecordingTransportErrorMapper {
	metadata: Arc<Mutex<Vec<Option<ResponseMetadata>>>>,
}
impl TransportErrorMapper<FakeTransportError> for RecordingTransportErrorMapper {
	fn map_transport_error(
		&self,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<FakeTransportError>,
	) -> Error {
		self.metadata.lock().push(meta.cloned());

		map_common_transport_error(err)
	}
}

type FakeFetcher = TokenFetcher<RecordingHttpClient, RecordingTransportErrorMapper>;

fn service() -> ServiceDescriptor {
	ServiceDescriptor::production().expect("Production descriptor should build.")
}

fn fake_fetcher(client: RecordingHttpClient, consumer_id: &str, private_key: &str) -> FakeFetcher {
	TokenFetcher::with_http_client(
		Credentials::new(consumer_id, private_key),
		service(),
		client,
		RecordingTransportErrorMapper::default(),
	)
}

#[tokio::test]
async fn returns_access_token_from_mocked_body() {
	let client = RecordingHttpClient::replying(
		200,
		r#"{"access_token":"abc123","token_type":"Bearer","expires_in":900}"#,
	);
	let fetcher = fake_fetcher(client.clone(), "consumer", "secret");
	let token = fetcher.get_token(None).await.expect("Mocked token should be returned.");

	assert_eq!(token.expose(), "abc123");
	assert_eq!(client.requests.lock().len(), 1);
}

#[tokio::test]
async fn missing_token_fails_with_token_not_received() {
	for body in ["{}", "not json", r#"{"token_type":"Bearer"}"#, ""] {
		let client = RecordingHttpClient::replying(200, body);
		let err = fake_fetcher(client, "consumer", "secret")
			.get_token(Some("1700000000000"))
			.await
			.expect_err("Bodies without access_token must fail.");

		assert!(err.is_token_not_received(), "{body:?} produced {err:?}.");
		assert_eq!(err.code(), Some(Error::TOKEN_NOT_RECEIVED_CODE));
	}
}

#[tokio::test]
async fn sends_exact_basic_auth_and_service_headers() {
	let client = RecordingHttpClient::replying(200, r#"{"access_token":"t"}"#);
	let fetcher = fake_fetcher(client.clone(), "id:with:colons", "k3y/+=");

	fetcher.fetch().await.expect("Mocked token should be returned.");

	assert_eq!(
		client.header_values("authorization"),
		[format!("Basic {}", STANDARD.encode("id:with:colons:k3y/+="))]
	);
	assert_eq!(client.header_values("content-type"), ["application/x-www-form-urlencoded"]);
	assert_eq!(client.header_values("accept"), ["application/json"]);
	assert_eq!(client.header_values("wm_svc.name"), ["Walmart Marketplace"]);
	assert_eq!(client.header_values("wm_svc.version"), ["1.0.0"]);

	let requests = client.requests.lock();
	let request = requests.first().expect("One request should be recorded.");

	assert_eq!(request.uri(), "https://marketplace.walmartapis.com/v3/token");
	assert_eq!(request.body().as_slice(), b"grant_type=client_credentials");
}

#[tokio::test]
async fn correlation_ids_are_unique_per_call() {
	const CALLS: usize = 128;

	let client = RecordingHttpClient::replying(200, r#"{"access_token":"t"}"#);
	let fetcher = fake_fetcher(client.clone(), "consumer", "secret");

	for _ in 0..CALLS {
		fetcher.get_token(None).await.expect("Mocked token should be returned.");
	}

	let ids = client.header_values("wm_qos.correlation_id");
	let unique = ids.iter().collect::<HashSet<_>>();

	assert_eq!(ids.len(), CALLS);
	assert_eq!(unique.len(), CALLS, "Correlation ids must not repeat.");
}

#[tokio::test]
async fn transport_failures_surface_unwrapped() {
	let client = RecordingHttpClient::refusing();
	let mapper = RecordingTransportErrorMapper::default();
	let fetcher: FakeFetcher = TokenFetcher::with_http_client(
		Credentials::new("consumer", "secret"),
		service(),
		client.clone(),
		mapper.clone(),
	);
	let err = fetcher.get_token(None).await.expect_err("Refused connections must fail.");

	match err {
		Error::Transport(TransportError::Network { source }) =>
			assert_eq!(source.to_string(), "Connection refused."),
		other => panic!("Unexpected error variant: {other:?}."),
	}

	assert_eq!(client.requests.lock().len(), 1, "Failures must not be retried.");
	assert_eq!(mapper.metadata.lock().as_slice(), [None]);
}

#[tokio::test]
async fn stateless_exchange_matches_fetcher() {
	let client = RecordingHttpClient::replying(200, r#"{"access_token":"stateless"}"#);
	let credentials = Credentials::new("consumer", "secret");
	let token = exchange::fetch_token(
		&client,
		&RecordingTransportErrorMapper::default(),
		&service(),
		&credentials,
	)
	.await
	.expect("Stateless exchange should return the token.");

	assert_eq!(token.into_inner(), "stateless");
}

#[tokio::test]
async fn fetcher_is_shareable_across_tasks() {
	let client = RecordingHttpClient::replying(200, r#"{"access_token":"shared"}"#);
	let fetcher = Arc::new(fake_fetcher(client.clone(), "consumer", "secret"));
	let handles = (0..8)
		.map(|_| {
			let fetcher = Arc::clone(&fetcher);

			tokio::spawn(async move { fetcher.get_token(None).await })
		})
		.collect::<Vec<_>>();

	for handle in handles {
		let token = handle
			.await
			.expect("Task should not panic.")
			.expect("Each concurrent call should succeed.");

		assert_eq!(token.expose(), "shared");
	}

	assert_eq!(client.requests.lock().len(), 8);
}

#[test]
fn synchronous_callers_block_on_current_thread_runtime() {
	let client = RecordingHttpClient::replying(200, r#"{"access_token":"blocking"}"#);
	let fetcher = fake_fetcher(client.clone(), "consumer", "secret");
	let runtime = tokio::runtime::Builder::new_current_thread()
		.enable_all()
		.build()
		.expect("Current-thread runtime should build.");
	let token = runtime
		.block_on(fetcher.get_token(Some("1700000000000")))
		.expect("Blocking callers should receive the token.");

	assert_eq!(token.expose(), "blocking");
	assert_eq!(client.requests.lock().len(), 1);
}
