//! # kauth
//!
//! Everything the examples need to talk to the K-Auth identity provider:
//! - PKCE verifier/challenge generation
//! - Anti-forgery `state` tokens
//! - Token set types and the provider response envelope
//! - Authorize and logout URL building
//! - The `Provider` trait and its HTTP implementation for K-Auth
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kauth::oauth::{providers::kauth::Provider as KAuthProvider, Endpoints, PkceVerifier};
//!
//! let verifier = PkceVerifier::generate();
//! let url = endpoints.authorization_url(&client_id, &redirect_uri, &verifier.challenge(), None)?;
//! ```

pub mod error;
pub mod oauth;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
