//! Business logic of the K-Auth examples.
//!
//! `web` talks to this crate only; provider details stay behind `gateway`.

pub use kauth::oauth::token::TokenSet;

pub mod auth_context;
pub mod auth_flow;
pub mod client_side;
pub mod error;

pub mod gateway;
