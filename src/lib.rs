//! Client-credentials token exchange for the Walmart Marketplace API.
//!
//! The crate trades a consumer id and private key for a bearer token by posting
//! `grant_type=client_credentials` to the marketplace token endpoint with HTTP Basic
//! authentication and the `WM_SVC.*`/`WM_QOS.*` service headers. Nothing is cached and
//! nothing is retried; every call is one request and one outcome.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod clock;
pub mod correlation;
pub mod error;
pub mod exchange;
pub mod fetcher;
pub mod http;
pub mod obs;
pub mod service;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::time::Duration;
	// self
	use crate::{
		auth::Credentials,
		exchange::ReqwestTransportErrorMapper,
		fetcher::{ReqwestTokenFetcher, TokenFetcher},
		http::ReqwestHttpClient,
		service::ServiceDescriptor,
	};

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		ReqwestHttpClient::with_client(
			insecure_client_builder()
				.build()
				.expect("Failed to build insecure Reqwest client for tests."),
		)
	}

	/// Same as [`test_reqwest_http_client`] with a per-request timeout.
	pub fn test_reqwest_http_client_with_timeout(timeout: Duration) -> ReqwestHttpClient {
		ReqwestHttpClient::with_client(
			insecure_client_builder()
				.timeout(timeout)
				.build()
				.expect("Failed to build insecure Reqwest client for tests."),
		)
	}

	/// Builds a [`ServiceDescriptor`] pointing at a mock token endpoint.
	pub fn test_service(token_endpoint: &str) -> ServiceDescriptor {
		ServiceDescriptor::builder()
			.token_endpoint(Url::parse(token_endpoint).expect("Mock token endpoint should parse."))
			.build()
			.expect("Mock service descriptor should build.")
	}

	/// Constructs a [`TokenFetcher`] for `token_endpoint` backed by `http_client`.
	pub fn build_reqwest_test_fetcher(
		token_endpoint: &str,
		consumer_id: &str,
		private_key: &str,
		http_client: ReqwestHttpClient,
	) -> ReqwestTokenFetcher {
		TokenFetcher::with_http_client(
			Credentials::new(consumer_id, private_key),
			test_service(token_endpoint),
			http_client,
			Arc::new(ReqwestTransportErrorMapper),
		)
	}

	fn insecure_client_builder() -> reqwest::ClientBuilder {
		ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		sync::Arc,
	};
	#[cfg(any(test, feature = "reqwest"))] pub use std::pin::Pin;

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};

pub use auth::{AccessToken, Credentials, TokenRequest};
pub use clock::current_millis;
#[cfg(feature = "reqwest")] pub use fetcher::fetch_token;
pub use fetcher::TokenFetcher;
