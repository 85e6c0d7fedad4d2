//! Provider implementations.

pub mod kauth;
