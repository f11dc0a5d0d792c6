//! Shared utilities.
//!
//! - [`email`]: SMTP email sending
//! - [`errors`]: application error type and envelope translation
//! - [`jwt`]: token signing and verification
//! - [`password`]: password hashing and verification
//! - [`response`]: uniform success envelope
//! - [`storage`]: file storage abstraction

pub mod email;
pub mod errors;
pub mod jwt;
pub mod password;
pub mod response;
pub mod storage;
