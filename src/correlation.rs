//! Per-request correlation identifiers sent as `WM_QOS.CORRELATION_ID`.

// crates.io
use uuid::Uuid;
// self
use crate::_prelude::*;

/// Random UUIDv4 rendered as a lowercase hyphenated string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationId(Uuid);
impl CorrelationId {
	/// Generates a fresh identifier.
	pub fn generate() -> Self {
		Self(Uuid::new_v4())
	}

	/// Returns the underlying UUID.
	pub fn as_uuid(&self) -> &Uuid {
		&self.0
	}
}
impl Debug for CorrelationId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "CorrelationId({})", self.0)
	}
}
impl Display for CorrelationId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.0.hyphenated(), f)
	}
}
