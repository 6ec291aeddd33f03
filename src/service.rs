//! Token service descriptor: the endpoint, `WM_SVC.*` header values, and timeout applied to
//! every exchange.
//!
//! [`ServiceDescriptor`] is the crate's configuration surface. It is assembled through
//! [`ServiceDescriptorBuilder`] (or deserialized, which runs the same validation) so a
//! descriptor in hand always points at an HTTPS endpoint with header-safe values.

/// Builder API for assembling service descriptors.
pub mod builder;

pub use builder::*;

// std
use std::time::Duration;
// self
use crate::_prelude::*;

/// Production token endpoint.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://marketplace.walmartapis.com/v3/token";
/// Value sent as `WM_SVC.NAME`.
pub const DEFAULT_SERVICE_NAME: &str = "Walmart Marketplace";
/// Value sent as `WM_SVC.VERSION`.
pub const DEFAULT_SERVICE_VERSION: &str = "1.0.0";
/// Whole-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Immutable, validated description of the token service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ServiceDescriptorBuilder")]
pub struct ServiceDescriptor {
	/// Token endpoint receiving the `client_credentials` POST.
	pub token_endpoint: Url,
	/// Value of the `WM_SVC.NAME` header.
	pub service_name: String,
	/// Value of the `WM_SVC.VERSION` header.
	pub service_version: String,
	/// Whole-request timeout in seconds.
	pub timeout_secs: u64,
}
impl ServiceDescriptor {
	/// Creates a new builder seeded with the production defaults.
	pub fn builder() -> ServiceDescriptorBuilder {
		ServiceDescriptorBuilder::default()
	}

	/// Descriptor for the production marketplace endpoint.
	pub fn production() -> Result<Self, ServiceDescriptorError> {
		Self::builder().build()
	}

	/// Returns the request timeout.
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}
}
impl TryFrom<ServiceDescriptorBuilder> for ServiceDescriptor {
	type Error = ServiceDescriptorError;

	fn try_from(builder: ServiceDescriptorBuilder) -> Result<Self, Self::Error> {
		builder.build()
	}
}
