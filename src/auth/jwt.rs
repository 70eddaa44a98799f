//! JWT token handling
//!
//! The client never holds the signing key. Tokens are decoded only to read
//! the identity and expiry; the server verifies the signature on every
//! request.

use crate::auth::models::{User, UserRole};
use crate::error::{Error, Result};
use crate::records::ids;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize};

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Subject (user ID)
    #[serde(default, deserialize_with = "ids::id")]
    pub sub: String,
    #[serde(default)]
    pub email: String,
    /// User role
    pub role: UserRole,
    /// Students linked to a parent account
    #[serde(
        default,
        alias = "student_ids",
        deserialize_with = "ids::id_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub student_ids: Vec<String>,
    /// Issued at
    #[serde(default, deserialize_with = "numeric_date", skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiration time, seconds since epoch
    #[serde(default, deserialize_with = "numeric_date", skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumericDate {
    Whole(i64),
    Fractional(f64),
}

/// Seconds since epoch, fractional values floored
fn numeric_date<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NumericDate>::deserialize(deserializer)?.map(|date| match date {
        NumericDate::Whole(secs) => secs,
        NumericDate::Fractional(secs) => secs.floor() as i64,
    }))
}

impl Claims {
    /// Check if token is expired at `now` (seconds since epoch).
    /// A token without an `exp` claim never expires by this check.
    pub fn is_expired_at(&self, now: i64) -> bool {
        matches!(self.exp, Some(exp) if exp < now)
    }

    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }

    /// Identity snapshot derived from the claims
    pub fn to_user(&self) -> User {
        User {
            id: self.sub.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            student_ids: self.student_ids.clone(),
            expires_at: self.exp,
        }
    }
}

/// Decode the payload of a `header.payload.signature` token.
///
/// Fails on anything that is not three dot-separated segments with a
/// base64url JSON header and payload. The header algorithm and the
/// signature are not looked at.
pub fn decode_claims(token: &str) -> Result<Claims> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    let [header, payload, _signature] = segments.as_slice() else {
        return Err(Error::InvalidToken(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let header = decode_segment(header, "header")?;
    if !serde_json::from_slice::<serde_json::Value>(&header)
        .map_err(|e| Error::InvalidToken(format!("header: {}", e)))?
        .is_object()
    {
        return Err(Error::InvalidToken("header is not a JSON object".to_string()));
    }

    let payload = decode_segment(payload, "payload")?;
    serde_json::from_slice::<Claims>(&payload)
        .map_err(|e| Error::InvalidToken(format!("payload: {}", e)))
}

fn decode_segment(segment: &str, name: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| Error::InvalidToken(format!("{}: {}", name, e)))
}
