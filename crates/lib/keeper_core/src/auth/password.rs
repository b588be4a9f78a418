//! Password hashing via bcrypt.

use std::fmt;

use tracing::warn;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// bcrypt only looks at the first 72 bytes of its input.
const MAX_PASSWORD_BYTES: usize = 72;

/// A bcrypt hash as stored in `users.password_hash`.
///
/// The empty value is the failure sentinel returned by [`hash_password`];
/// callers must treat it as a hard error, never as a usable credential.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct HashedCredential(String);

impl HashedCredential {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for HashedCredential {
    fn from(hash: String) -> Self {
        Self(hash)
    }
}

// Never print the hash itself.
impl fmt::Debug for HashedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("HashedCredential(<empty>)")
        } else {
            f.write_str("HashedCredential(<redacted>)")
        }
    }
}

/// Hash a password with bcrypt (cost 10).
///
/// Returns the empty sentinel when the password is longer than bcrypt can
/// take, instead of silently hashing a truncated prefix.
pub fn hash_password(password: &str) -> HashedCredential {
    if password.len() > MAX_PASSWORD_BYTES {
        warn!(len = password.len(), "password exceeds bcrypt input limit");
        return HashedCredential::default();
    }
    match bcrypt::hash(password, BCRYPT_COST) {
        Ok(hash) => HashedCredential(hash),
        Err(e) => {
            warn!("bcrypt hash: {e}");
            HashedCredential::default()
        }
    }
}

/// Verify a password against a bcrypt hash.
///
/// Malformed or empty hashes never match.
pub fn verify_password(password: &str, hash: &HashedCredential) -> bool {
    if hash.is_empty() || password.len() > MAX_PASSWORD_BYTES {
        return false;
    }
    bcrypt::verify(password, hash.as_str()).unwrap_or(false)
}
