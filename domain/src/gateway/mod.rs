//! Gateways to external services.

pub mod kauth;
