//! # keeper_core
//!
//! Core domain logic for Keeper: password hashing, bearer tokens, the
//! secret payload codec and the services that sit on top of the stores.

pub mod auth;
pub mod migrate;
pub mod models;
pub mod secrets;
pub mod store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
