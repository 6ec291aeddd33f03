//! Credential pair, access-token wrapper, and the request/response models of the token
//! exchange.

pub mod credentials;
pub mod token;

pub use credentials::*;
pub use token::{request::*, response::*, secret::*};
