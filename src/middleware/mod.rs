//! Middleware for the request pipeline.
//!
//! - [`auth`]: bearer and basic authentication gates
//! - [`cors`]: origin allow-list gate and CORS headers
//! - [`rate_limit`]: IP-keyed request rate limiting
//! - [`role`]: role hierarchy policy and role gates
//! - [`timeout`]: request timeout enforcement

pub mod auth;
pub mod cors;
pub mod rate_limit;
pub mod role;
pub mod timeout;
