//! Bearer token payload decoding
//!
//! Extracts the display identity and expiry from a JWT-shaped token without
//! verifying its signature. Signature checks belong to the backend; the client
//! only needs the claims to render the signed-in user and to drop stale tokens.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Deserializer, Serialize};

/// Decoded, display-relevant subset of a token's claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl Identity {
    /// Name to greet the user with, falling back to the email address
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// Token decoding errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token expired at {expired_at}")]
    Expired { expired_at: i64 },
}

impl DecodeError {
    fn malformed(reason: impl Into<String>) -> Self {
        DecodeError::Malformed(reason.into())
    }
}

/// Claims the client understands. Anything else in the payload is ignored.
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
    #[serde(default, deserialize_with = "numeric_date")]
    exp: Option<i64>,
}

/// `exp` is a NumericDate, which issuers occasionally emit as a float
fn numeric_date<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(value.and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64))))
}

/// Identity plus the expiry instant carried by the token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    pub identity: Identity,
    /// Expiry in seconds since the Unix epoch, if the token has one
    pub expires_at: Option<i64>,
}

impl DecodedToken {
    /// A token is usable while its expiry is strictly after `now`.
    /// Tokens without `exp` never expire on the client.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    pub fn check_expiry(self, now: i64) -> Result<Self, DecodeError> {
        match self.expires_at {
            Some(expired_at) if expired_at <= now => Err(DecodeError::Expired { expired_at }),
            _ => Ok(self),
        }
    }
}

/// Decode a token's payload segment into an identity
///
/// Fails with [`DecodeError::Malformed`] when the token is not three
/// dot-separated segments, the payload is not base64url JSON, or the
/// subject is missing. Optional claims simply come back as `None`.
pub fn decode(token: &str) -> Result<DecodedToken, DecodeError> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(DecodeError::malformed(format!(
            "expected 3 segments, found {}",
            parts.len()
        )));
    }

    let payload = parts[1].trim_end_matches('=');
    if payload.is_empty() {
        return Err(DecodeError::malformed("empty payload segment"));
    }
    // Some issuers emit the standard alphabet; map it onto base64url.
    let payload = payload.replace('+', "-").replace('/', "_");

    let bytes = URL_SAFE_NO_PAD
        .decode(&payload)
        .map_err(|e| DecodeError::malformed(format!("payload is not base64url: {e}")))?;

    let claims: Claims = serde_json::from_slice(&bytes)
        .map_err(|e| DecodeError::malformed(format!("payload is not a claims object: {e}")))?;

    let subject_id = claims
        .sub
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DecodeError::malformed("missing subject claim"))?;

    Ok(DecodedToken {
        identity: Identity {
            subject_id,
            email: claims.email.unwrap_or_default(),
            display_name: claims.name.filter(|s| !s.is_empty()),
            avatar_url: claims.picture.filter(|s| !s.is_empty()),
        },
        expires_at: claims.exp,
    })
}

/// Decode and reject tokens that are already expired at `now`
pub fn decode_at(token: &str, now: i64) -> Result<DecodedToken, DecodeError> {
    decode(token)?.check_expiry(now)
}

#[cfg(test)]
pub(crate) mod testutil {
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use jsonwebtoken::{EncodingKey, Header, encode};

    /// Sign arbitrary claims the way the backend does (HS256)
    pub fn mint(claims: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test_secret_key_for_testing_only"),
        )
        .unwrap()
    }

    /// Build a token with a raw payload segment
    pub fn with_payload(payload: &[u8]) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload);
        format!("{header}.{payload}.signature")
    }
}
