//! Consumer id + private key pair and the Basic-Auth header derived from it.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use oauth2::{ClientId, ClientSecret};
// self
use crate::_prelude::*;

/// Credential pair issued by the Developer Portal.
///
/// The private key is only ever used as the HTTP Basic password; it is not key material.
/// Values are not validated locally, so empty or wrong credentials surface as a remote
/// rejection.
#[derive(Clone, Debug, Deserialize)]
pub struct Credentials {
	/// Public consumer identifier (the OAuth client id).
	pub consumer_id: ClientId,
	/// Client secret; redacted by its `Debug` implementation.
	pub private_key: ClientSecret,
}
impl Credentials {
	/// Creates a credential pair.
	pub fn new(consumer_id: impl Into<String>, private_key: impl Into<String>) -> Self {
		Self {
			consumer_id: ClientId::new(consumer_id.into()),
			private_key: ClientSecret::new(private_key.into()),
		}
	}

	/// Returns `base64("{consumer_id}:{private_key}")`.
	///
	/// Neither part is form-encoded before joining, so a `:` inside either value is carried
	/// through verbatim.
	pub fn basic_token(&self) -> String {
		let joined = format!("{}:{}", self.consumer_id.as_str(), self.private_key.secret());

		STANDARD.encode(joined)
	}

	/// Returns the full `Authorization` header value.
	pub fn basic_authorization(&self) -> String {
		format!("Basic {}", self.basic_token())
	}
}
