//! This module holds typed parameters for endpoint inputs.
//!
//! Redirect-driven endpoints receive their inputs as query strings set by the
//! browser or by K-Auth; typing them here keeps the controllers free of parsing.

pub(crate) mod callback;
