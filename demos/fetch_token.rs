//! Fetches a marketplace token from a local HTTPS mock standing in for the production token
//! endpoint, using the default reqwest transport.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use walmart_marketplace_auth::{
	auth::Credentials,
	current_millis,
	exchange::ReqwestTransportErrorMapper,
	fetcher::{ReqwestTokenFetcher, TokenFetcher},
	http::ReqwestHttpClient,
	reqwest::Client,
	service::ServiceDescriptor,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v3/token").body("grant_type=client_credentials");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let service =
		ServiceDescriptor::builder().token_endpoint(Url::parse(&server.url("/v3/token"))?).build()?;
	// The mock server presents a self-signed certificate; production code should use
	// `TokenFetcher::new`, which keeps certificate verification on.
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let fetcher: ReqwestTokenFetcher = TokenFetcher::with_http_client(
		Credentials::new("demo-consumer", "demo-private-key"),
		service,
		http_client,
		Arc::new(ReqwestTransportErrorMapper),
	)
	.with_request_context("https://marketplace.walmartapis.com/v3/items", "GET");
	let timestamp = current_millis().to_string();
	let token = fetcher.get_token(Some(&timestamp)).await?;

	println!("Marketplace access token: {}.", token.expose());

	token_mock.assert_async().await;

	Ok(())
}
