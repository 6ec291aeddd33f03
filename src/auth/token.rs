//! Token-side models: the redacted access token, the legacy request context, and the
//! token endpoint's JSON body.

pub mod request;
pub mod response;
pub mod secret;
