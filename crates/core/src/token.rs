//! Bearer-token payload decoding.
//!
//! The backend issues JWTs and is the sole verifier of their signatures.
//! The client only decodes the payload segment to learn who is logged in;
//! a token that fails to decode is treated as absent and cleared.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::types::{UserId, UserType};

/// Errors that can occur when decoding a bearer token payload.
#[derive(thiserror::Error, Debug)]
pub enum TokenError {
    /// The token is not a three-segment JWT.
    #[error("token is not a three-segment JWT")]
    MalformedStructure,
    /// The payload segment is not valid base64url.
    #[error("token payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded payload is not the expected JSON shape.
    #[error("token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Claims carried in a backend-issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Backend user id.
    pub user_id: UserId,
    /// Phone number the OTP was verified against.
    pub phone_number: String,
    /// Role the token was issued for.
    pub user_type: UserType,
    /// Expiry as a unix timestamp, when present.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Decode the middle segment of a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] if the token does not have exactly three
    /// segments, the payload is not base64url, or the JSON does not match
    /// the expected claims shape.
    pub fn decode(token: &str) -> Result<Self, TokenError> {
        let mut segments = token.split('.');
        let payload = match (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => return Err(TokenError::MalformedStructure),
        };

        let bytes = URL_SAFE_NO_PAD.decode(payload)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn make_token(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
        format!("{header}.{body}.signature-not-checked-client-side")
    }

    #[test]
    fn test_decode_well_formed_token() {
        let token = make_token(&serde_json::json!({
            "user_id": "f7e3b1d0-2a54-4b8f-8f0e-5d9c2a7b1c34",
            "phone_number": "+917021758061",
            "user_type": "seller",
            "exp": 1_770_000_000,
        }));

        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.user_id.as_str(), "f7e3b1d0-2a54-4b8f-8f0e-5d9c2a7b1c34");
        assert_eq!(claims.user_type, UserType::Seller);
        assert_eq!(claims.exp, Some(1_770_000_000));
    }

    #[test]
    fn test_decode_token_without_exp() {
        let token = make_token(&serde_json::json!({
            "user_id": "u-1",
            "phone_number": "+919876543210",
            "user_type": "broker",
        }));

        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.user_type, UserType::Broker);
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn test_decode_rejects_wrong_segment_count() {
        assert!(matches!(
            TokenClaims::decode("not-a-jwt"),
            Err(TokenError::MalformedStructure)
        ));
        assert!(matches!(
            TokenClaims::decode("only.two"),
            Err(TokenError::MalformedStructure)
        ));
        assert!(matches!(
            TokenClaims::decode("a.b.c.d"),
            Err(TokenError::MalformedStructure)
        ));
    }

    #[test]
    fn test_decode_rejects_bad_base64_payload() {
        assert!(matches!(
            TokenClaims::decode("header.!!!not-base64!!!.sig"),
            Err(TokenError::Base64(_))
        ));
    }

    #[test]
    fn test_decode_rejects_unexpected_json_shape() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"hello": "world"}"#);
        let token = format!("h.{payload}.s");
        assert!(matches!(
            TokenClaims::decode(&token),
            Err(TokenError::Json(_))
        ));
    }
}
