// crates.io
use oauth2::http::HeaderValue;
// self
use crate::{
	_prelude::*,
	service::{
		DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_VERSION, DEFAULT_TIMEOUT_SECS,
		DEFAULT_TOKEN_ENDPOINT, ServiceDescriptor,
	},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ServiceDescriptorError {
	/// Endpoint string could not be parsed.
	#[error("The token endpoint is not a valid URL.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTPS.
	#[error("The token endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Header-backed values cannot be blank.
	#[error("The {header} header value cannot be blank.")]
	BlankHeader {
		/// Header that failed validation.
		header: &'static str,
	},
	/// Header-backed values must be representable as HTTP header values.
	#[error("The {header} header value contains characters HTTP headers cannot carry.")]
	InvalidHeader {
		/// Header that failed validation.
		header: &'static str,
	},
	/// A zero timeout would fail every request.
	#[error("The request timeout must be at least one second.")]
	ZeroTimeout,
}

/// Builder for [`ServiceDescriptor`] values. Unset fields fall back to the production
/// defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServiceDescriptorBuilder {
	/// Token endpoint override.
	pub token_endpoint: Option<Url>,
	/// `WM_SVC.NAME` override.
	pub service_name: Option<String>,
	/// `WM_SVC.VERSION` override.
	pub service_version: Option<String>,
	/// Timeout override, in seconds.
	pub timeout_secs: Option<u64>,
}
impl ServiceDescriptorBuilder {
	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the `WM_SVC.NAME` header value.
	pub fn service_name(mut self, name: impl Into<String>) -> Self {
		self.service_name = Some(name.into());

		self
	}

	/// Sets the `WM_SVC.VERSION` header value.
	pub fn service_version(mut self, version: impl Into<String>) -> Self {
		self.service_version = Some(version.into());

		self
	}

	/// Sets the whole-request timeout in seconds.
	pub fn timeout_secs(mut self, secs: u64) -> Self {
		self.timeout_secs = Some(secs);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ServiceDescriptor, ServiceDescriptorError> {
		let token_endpoint = match self.token_endpoint {
			Some(url) => url,
			None => Url::parse(DEFAULT_TOKEN_ENDPOINT)
				.map_err(|source| ServiceDescriptorError::InvalidEndpoint { source })?,
		};
		let descriptor = ServiceDescriptor {
			token_endpoint,
			service_name: self.service_name.unwrap_or_else(|| DEFAULT_SERVICE_NAME.into()),
			service_version: self
				.service_version
				.unwrap_or_else(|| DEFAULT_SERVICE_VERSION.into()),
			timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ServiceDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ServiceDescriptorError> {
		if self.token_endpoint.scheme() != "https" {
			return Err(ServiceDescriptorError::InsecureEndpoint {
				url: self.token_endpoint.to_string(),
			});
		}
		if self.timeout_secs == 0 {
			return Err(ServiceDescriptorError::ZeroTimeout);
		}

		validate_header("WM_SVC.NAME", &self.service_name)?;
		validate_header("WM_SVC.VERSION", &self.service_version)?;

		Ok(())
	}
}

fn validate_header(header: &'static str, value: &str) -> Result<(), ServiceDescriptorError> {
	if value.trim().is_empty() {
		return Err(ServiceDescriptorError::BlankHeader { header });
	}
	if HeaderValue::from_str(value).is_err() {
		return Err(ServiceDescriptorError::InvalidHeader { header });
	}

	Ok(())
}
