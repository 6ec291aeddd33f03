//! Crate-level error types shared by the exchange, fetcher, and transport layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The token endpoint answered without a usable `access_token`.
	///
	/// Covers rejected credentials, empty bodies, malformed JSON, and JSON objects whose
	/// `access_token` is missing or empty.
	#[error("Token not received (code {code}).", code = Error::TOKEN_NOT_RECEIVED_CODE)]
	TokenNotReceived {
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Structured parsing failure when the body was not a token JSON object.
		#[source]
		source: Option<serde_path_to_error::Error<serde_json::Error>>,
	},
}
impl Error {
	/// Fixed diagnostic code attached to [`Error::TokenNotReceived`].
	pub const TOKEN_NOT_RECEIVED_CODE: u32 = 1_446_780_146;

	/// Returns the diagnostic code for errors that carry one.
	pub fn code(&self) -> Option<u32> {
		match self {
			Self::TokenNotReceived { .. } => Some(Self::TOKEN_NOT_RECEIVED_CODE),
			_ => None,
		}
	}

	/// Returns true when the token endpoint answered without an access token.
	pub fn is_token_not_received(&self) -> bool {
		matches!(self, Self::TokenNotReceived { .. })
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Service descriptor failed validation.
	#[error("Service descriptor is invalid.")]
	InvalidService(#[from] crate::service::ServiceDescriptorError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO). Never retried.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The token endpoint did not answer within the configured timeout.
	#[error("Request timed out while calling the token endpoint.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_not_received_carries_fixed_code() {
		let err = Error::TokenNotReceived { status: Some(401), source: None };

		assert_eq!(err.code(), Some(1_446_780_146));
		assert!(err.is_token_not_received());
		assert_eq!(err.to_string(), "Token not received (code 1446780146).");
	}

	#[test]
	fn transport_errors_have_no_code() {
		let err: Error =
			TransportError::from(std::io::Error::other("connection refused")).into();

		assert_eq!(err.code(), None);
		assert!(!err.is_token_not_received());
		assert!(matches!(err, Error::Transport(TransportError::Io(_))));
	}
}
