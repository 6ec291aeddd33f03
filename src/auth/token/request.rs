//! Legacy request context kept for callers migrating from signature-based integrations.
//!
//! Older marketplace clients passed the target URL, HTTP method, and a timestamp when asking
//! for credentials. None of these reach the token endpoint; [`TokenRequest`] exists so they
//! can still be accepted, resolved, and traced.

// self
use crate::{_prelude::*, clock};

/// Request context recorded alongside a token exchange. Never transmitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRequest {
	/// URL of the API call the token is meant for.
	pub request_url: String,
	/// HTTP method of the API call the token is meant for.
	pub request_method: String,
	/// Unix timestamp in milliseconds.
	pub timestamp: i64,
}
impl TokenRequest {
	/// Creates a context stamped with the current time.
	pub fn new(request_url: impl Into<String>, request_method: impl Into<String>) -> Self {
		Self {
			request_url: request_url.into(),
			request_method: request_method.into(),
			timestamp: clock::current_millis(),
		}
	}

	/// Replaces the timestamp with the resolved form of `raw`.
	pub fn with_timestamp(mut self, raw: Option<&str>) -> Self {
		self.timestamp = Self::resolve_timestamp(raw);

		self
	}

	/// Resolves a caller-supplied timestamp.
	///
	/// Numeric input is kept, saturating at the `i64` bounds; absent or non-numeric input falls
	/// back to [`clock::current_millis`].
	pub fn resolve_timestamp(raw: Option<&str>) -> i64 {
		raw.and_then(clock::parse_millis).unwrap_or_else(clock::current_millis)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn numeric_timestamp_is_kept() {
		let request = TokenRequest::new("https://example.com/v3/items", "GET")
			.with_timestamp(Some("1446780146000"));

		assert_eq!(request.timestamp, 1_446_780_146_000);
		assert_eq!(request.request_url, "https://example.com/v3/items");
		assert_eq!(request.request_method, "GET");
	}

	#[test]
	fn out_of_range_timestamp_saturates_instead_of_defaulting() {
		assert_eq!(TokenRequest::resolve_timestamp(Some("99999999999999999999")), i64::MAX);
		assert_eq!(TokenRequest::resolve_timestamp(Some("-99999999999999999999")), i64::MIN);
		assert_eq!(TokenRequest::resolve_timestamp(Some("1e400")), i64::MAX);
	}

	#[test]
	fn missing_or_invalid_timestamp_defaults_to_now() {
		for raw in [None, Some("not-a-number"), Some("")] {
			let before = clock::current_millis();
			let resolved = TokenRequest::resolve_timestamp(raw);
			let after = clock::current_millis();

			assert!((before..=after).contains(&resolved), "{raw:?} resolved to {resolved}.");
		}
	}
}
