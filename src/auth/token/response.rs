//! JSON body returned by the token endpoint.

// self
use crate::{_prelude::*, auth::AccessToken};

/// Token endpoint payload. Only `access_token` decides the outcome; the remaining fields
/// are informational and every unknown field is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
	/// Bearer token, when issued.
	#[serde(default)]
	pub access_token: Option<String>,
	/// Token type reported by the endpoint (usually `Bearer`).
	#[serde(default)]
	pub token_type: Option<String>,
	/// Token lifetime in seconds.
	#[serde(default)]
	pub expires_in: Option<i64>,
}
impl TokenResponse {
	/// Returns the access token when present and non-empty.
	pub fn into_access_token(self) -> Option<AccessToken> {
		self.access_token.filter(|token| !token.is_empty()).map(AccessToken::new)
	}
}
