//! Domain models.

pub mod auth;
pub mod secret;
