//! Credential inspection for fedlens.
//!
//! This crate is the functional core of the debug tool:
//! - [`jwt`]: unverified decoding of compact JWTs and a mock ID token
//! - [`saml`]: SAML Response decoding, normalization and pretty-printing
//!
//! Nothing here verifies a signature or enforces validity windows. Every
//! function is a pure transformation of its input.

mod error;

pub mod jwt;
pub mod saml;

pub use error::{InspectError, Result};
