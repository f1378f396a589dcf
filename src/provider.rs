//! Provider-facing descriptors.
//!
//! `descriptor` exposes validated metadata (`ProviderDescriptor`) covering the three HTTPS-only
//! OAuth 1.0a endpoints (request token, authorize, access token) and provider quirks (callback
//! confirmation, request-token lifetime).

pub mod descriptor;

pub use descriptor::*;
