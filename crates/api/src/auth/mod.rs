//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token validation (and issuance for tests/tooling).

pub mod jwt;
