//! JWT token generation and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::models::auth::TokenClaims;

/// Issuer label written into every token.
pub const ISSUER: &str = "keeper";

/// Token codec failures.
///
/// Validation failures are split so callers can tell an expired token from a
/// forged or garbled one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("token is expired")]
    Expired,

    #[error("token is invalid")]
    Malformed,

    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Issue a signed HS256 token for `subject`, valid for `ttl`.
///
/// Each token gets a fresh random `jti`, so two tokens minted in the same
/// second for the same subject still differ.
pub fn issue_token(secret: &[u8], subject: &str, ttl: Duration) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::Signing("empty signing secret".into()));
    }
    let now = Utc::now();
    let claims = TokenClaims {
        iss: ISSUER.to_string(),
        sub: subject.to_string(),
        jti: Uuid::new_v4().to_string(),
        iat: now.timestamp(),
        exp: expiry_timestamp(now, ttl),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Signing(format!("jwt encode: {e}")))
}

/// `exp` for a token issued at `now`. A positive `ttl` rounds up to the next
/// whole second so that a sub-second lifetime still outlives issuance.
fn expiry_timestamp(now: DateTime<Utc>, ttl: Duration) -> i64 {
    let expiry = now + ttl;
    if ttl > Duration::zero() && expiry.timestamp_subsec_nanos() > 0 {
        expiry.timestamp() + 1
    } else {
        expiry.timestamp()
    }
}

/// Verify a token's signature and expiry, returning the claims on success.
///
/// The signature is checked first: a token signed with another key reports
/// [`TokenError::SignatureInvalid`] even when it is also expired. Expiry has
/// no leeway, a token stops validating at `exp`.
pub fn validate_token(token: &str, secret: &[u8]) -> Result<TokenClaims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::SignatureInvalid);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })?;

    if Utc::now().timestamp() >= data.claims.exp {
        return Err(TokenError::Expired);
    }
    Ok(data.claims)
}
