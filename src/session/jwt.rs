use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;

use crate::error::{CommunityError, CommunityResult};

/// The claims the client reads from a bearer token. The signature is never
/// checked here; the gateway does that.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    #[serde(default, alias = "rol", alias = "tipoUsuario")]
    pub role: Option<String>,
    #[serde(default, rename = "idPersona", alias = "id_persona")]
    pub person_id: Option<i64>,
    #[serde(default)]
    pub sub: Option<serde_json::Value>,
    #[serde(default, alias = "usuario")]
    pub username: Option<String>,
}

impl Claims {
    pub fn is_expired_at(&self, unix_seconds: i64) -> bool {
        self.exp <= unix_seconds
    }
}

/// Decodes the payload segment of a JWT.
pub fn decode(token: &str) -> CommunityResult<Claims> {
    let mut segments = token.trim().split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if !payload.is_empty() => payload,
        _ => return Err(CommunityError::InvalidToken("expected three segments".into())),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| CommunityError::InvalidToken(format!("payload is not base64url: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| CommunityError::InvalidToken(format!("payload is not a claims object: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload.as_bytes())
        )
    }

    #[test]
    fn decodes_exp_and_role() {
        let claims = decode(&token_with(r#"{"exp":1700000000,"role":"admin","idPersona":12}"#)).unwrap();
        assert_eq!(claims.exp, 1_700_000_000);
        assert_eq!(claims.role.as_deref(), Some("admin"));
        assert_eq!(claims.person_id, Some(12));
    }

    #[test]
    fn accepts_spanish_role_claim() {
        let claims = decode(&token_with(r#"{"exp":1,"tipoUsuario":"usuario"}"#)).unwrap();
        assert_eq!(claims.role.as_deref(), Some("usuario"));
    }

    #[test]
    fn tolerates_padded_payload() {
        let padded = format!(
            "h.{}.s",
            base64::engine::general_purpose::URL_SAFE.encode(br#"{"exp":5}"#)
        );
        assert_eq!(decode(&padded).unwrap().exp, 5);
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(decode("not-a-jwt").is_err());
        assert!(decode("a..c").is_err());
        assert!(decode(&token_with("[]")).is_err());
    }

    #[test]
    fn expiry_is_inclusive() {
        let claims = decode(&token_with(r#"{"exp":100}"#)).unwrap();
        assert!(claims.is_expired_at(100));
        assert!(!claims.is_expired_at(99));
    }
}
