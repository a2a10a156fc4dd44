//! Token Service
//!
//! Issues and verifies self-contained bearer tokens. A token is
//! `base64url(claims JSON) + "." + base64url(HMAC-SHA256(claims segment))`
//! signed with the process-wide secret from [`AuthConfig`]. There is no
//! server-side session state and no revocation list: validity is purely a
//! function of (token, secret, current time).

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use thiserror::Error;

use crate::application::config::AuthConfig;

type HmacSha256 = Hmac<Sha256>;

/// Token verification failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Structurally invalid: wrong segment count, bad payload encoding,
    /// or claims that do not parse
    #[error("Token is malformed")]
    Malformed,

    /// Embedded expiry has passed (exact equality counts as expired)
    #[error("Token has expired")]
    Expired,

    /// Signature segment does not match the payload
    #[error("Token signature mismatch")]
    BadSignature,
}

/// Claims embedded in a token
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the user's email
    sub: String,
    /// Issued-at, unix seconds
    iat: i64,
    /// Absolute expiry, unix seconds
    exp: i64,
}

/// Stateless token issuer/verifier
#[derive(Clone)]
pub struct TokenService {
    config: Arc<AuthConfig>,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Issue a token for `subject` expiring `token_ttl` from now
    pub fn issue(&self, subject: &str) -> String {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as of an explicit clock reading
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> String {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + self.config.token_ttl_secs(),
        };

        // Claims are plain data; serialization cannot fail
        let payload = serde_json::to_vec(&claims).unwrap_or_default();
        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);

        let mut mac = HmacSha256::new_from_slice(&self.config.token_secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());
        let signature = mac.finalize().into_bytes();

        format!("{}.{}", payload_b64, URL_SAFE_NO_PAD.encode(signature))
    }

    /// Verify a token and return its subject
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify against an explicit clock reading
    ///
    /// Order of checks: structure, signature, expiry. A tampered signature
    /// therefore reports [`TokenError::BadSignature`] even if the token is
    /// also expired.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let (payload_b64, signature_b64) =
            token.split_once('.').ok_or(TokenError::Malformed)?;
        if signature_b64.contains('.') {
            return Err(TokenError::Malformed);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::BadSignature)?;

        let mut mac = HmacSha256::new_from_slice(&self.config.token_secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        // Hard boundary, no clock-skew grace
        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims.sub)
    }
}
