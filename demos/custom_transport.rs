//! Demonstrates registering a custom HTTP client and mapper that emit non-reqwest errors.
//!
//! 1. Implement [`TokenHttpClient`] so the transport records [`ResponseMetadata`] via the provided
//!    [`ResponseMetadataSlot`].
//! 2. Provide a [`TransportErrorMapper`] that understands the transport's own error type.
//! 3. Pass both to [`TokenFetcher::with_http_client`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
};
// crates.io
use color_eyre::Result;
// self
use walmart_marketplace_auth::{
	auth::Credentials,
	error::{Error, TransportError},
	exchange::{
		TransportErrorMapper, map_common_transport_error,
		oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse},
	},
	fetcher::TokenFetcher,
	http::{ResponseMetadata, ResponseMetadataSlot, TokenHttpClient},
	service::ServiceDescriptor,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let credentials = Credentials::new("demo-consumer", "demo-private-key");
	let service = ServiceDescriptor::production()?;
	let fetcher: TokenFetcher<OfflineHttpClient, OfflineTransportErrorMapper> =
		TokenFetcher::with_http_client(
			credentials.clone(),
			service.clone(),
			OfflineHttpClient(Behavior::Issue),
			OfflineTransportErrorMapper,
		);
	let token = fetcher.get_token(None).await?;

	println!("Access token issued by the offline transport: {}.", token.expose());

	for behavior in [Behavior::Dns("marketplace.walmartapis.com"), Behavior::Stall] {
		let failing: TokenFetcher<OfflineHttpClient, OfflineTransportErrorMapper> =
			TokenFetcher::with_http_client(
				credentials.clone(),
				service.clone(),
				OfflineHttpClient(behavior),
				OfflineTransportErrorMapper,
			);

		match failing.fetch().await {
			Ok(_) => println!("Offline transport unexpectedly produced a token."),
			Err(e) => println!("Transport error mapped by the fetcher: {e}."),
		}
	}

	Ok(())
}

#[derive(Debug)]
enum OfflineError {
	Dns { host: &'static str },
	Stalled,
}
impl Display for OfflineError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Dns { host } => write!(f, "DNS lookup failed for {host}"),
			Self::Stalled => write!(f, "Token endpoint stopped responding"),
		}
	}
}
impl StdError for OfflineError {}

#[derive(Clone, Copy)]
enum Behavior {
	Issue,
	Dns(&'static str),
	Stall,
}

struct OfflineHttpClient(Behavior);
impl TokenHttpClient for OfflineHttpClient {
	type Handle = OfflineHttpHandle;
	type TransportError = OfflineError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		OfflineHttpHandle { slot, behavior: self.0 }
	}
}

struct OfflineHttpHandle {
	slot: ResponseMetadataSlot,
	behavior: Behavior,
}
impl<'a> AsyncHttpClient<'a> for OfflineHttpHandle {
	type Error = HttpClientError<OfflineError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, _request: HttpRequest) -> Self::Future {
		let slot = self.slot.clone();
		let behavior = self.behavior;

		Box::pin(async move {
			slot.take();

			match behavior {
				Behavior::Issue => {
					slot.store(ResponseMetadata { status: Some(200) });

					Ok(HttpResponse::new(
						b"{\"access_token\":\"offline-access\",\"token_type\":\"Bearer\"}".to_vec(),
					))
				},
				// `HttpClientError::Reqwest` carries any transport error despite its name.
				Behavior::Dns(host) =>
					Err(HttpClientError::Reqwest(Box::new(OfflineError::Dns { host }))),
				Behavior::Stall => Err(HttpClientError::Reqwest(Box::new(OfflineError::Stalled))),
			}
		})
	}
}

struct OfflineTransportErrorMapper;
impl TransportErrorMapper<OfflineError> for OfflineTransportErrorMapper {
	fn map_transport_error(
		&self,
		_metadata: Option<&ResponseMetadata>,
		error: HttpClientError<OfflineError>,
	) -> Error {
		match error {
			HttpClientError::Reqwest(inner) => match *inner {
				OfflineError::Stalled => TransportError::timeout(OfflineError::Stalled).into(),
				other => TransportError::network(other).into(),
			},
			other => map_common_transport_error(other),
		}
	}
}
