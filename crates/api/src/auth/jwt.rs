//! Access tokens and refresh sessions.
//!
//! An access token is a short-lived HS256 JWT carrying [`Claims`]. A refresh
//! token is an opaque UUID handed to the client exactly once; the server
//! keeps only its SHA-256 hex digest, so a leaked sessions table cannot be
//! replayed against the API.

use atelier_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Default access token lifetime: 15 minutes.
const DEFAULT_ACCESS_EXPIRY_SECS: i64 = 900;
/// Default refresh session lifetime: 14 days.
const DEFAULT_REFRESH_EXPIRY_SECS: i64 = 1_209_600;

/// Claims payload signed into every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user's database id.
    pub sub: DbId,
    /// Role name at issue time (`"admin"` or `"editor"`).
    pub role: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Per-token UUID, logged alongside auth events.
    pub jti: String,
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret for signing and verification.
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_expiry_secs: i64,
    /// Refresh session lifetime in seconds.
    pub refresh_expiry_secs: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required), `JWT_EXPIRY_SECS` (default 900) and
    /// `REFRESH_EXPIRY_SECS` (default 1209600, 14 days) from the
    /// environment.
    ///
    /// # Panics
    ///
    /// Panics when `JWT_SECRET` is unset or empty, or when a lifetime
    /// variable is present but not an integer.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_expiry_secs: env_secs("JWT_EXPIRY_SECS", DEFAULT_ACCESS_EXPIRY_SECS),
            refresh_expiry_secs: env_secs("REFRESH_EXPIRY_SECS", DEFAULT_REFRESH_EXPIRY_SECS),
        }
    }
}

fn env_secs(key: &str, default: i64) -> i64 {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be an integer, got '{raw}'")),
        Err(_) => default,
    }
}

/// Issue an access token for `user_id` carrying the given role.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: iat + config.access_expiry_secs,
        iat,
        jti: Uuid::new_v4().to_string(),
    };

    // Header::default() selects HS256.
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry, returning the embedded claims on success.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Mint a fresh refresh token as `(plaintext, sha256_hex)`.
///
/// The plaintext goes to the client; only the digest is persisted.
pub fn generate_refresh_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let digest = hash_refresh_token(&plaintext);
    (plaintext, digest)
}

/// SHA-256 hex digest used to look up a presented refresh token.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-signing-secret-0123456789".to_string(),
            access_expiry_secs: 900,
            refresh_expiry_secs: 1_209_600,
        }
    }

    #[test]
    fn round_trip_preserves_claims() {
        let config = test_config();
        let token = generate_access_token(42, "admin", &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 900);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn jti_differs_per_token() {
        let config = test_config();
        let a = validate_token(
            &generate_access_token(7, "editor", &config).unwrap(),
            &config,
        )
        .unwrap();
        let b = validate_token(
            &generate_access_token(7, "editor", &config).unwrap(),
            &config,
        )
        .unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn expired_token_rejected() {
        let config = test_config();

        // Sign a token that expired well beyond the default 60s leeway.
        let iat = chrono::Utc::now().timestamp() - 600;
        let claims = Claims {
            sub: 1,
            role: "editor".to_string(),
            exp: iat + 120,
            iat,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn tampered_payload_rejected() {
        let config = test_config();
        let token = generate_access_token(9, "editor", &config).unwrap();

        // Flip the first character of the payload segment.
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let flipped = if parts[1].starts_with('A') { "B" } else { "A" };
        parts[1].replace_range(0..1, flipped);
        let tampered = parts.join(".");

        assert!(validate_token(&tampered, &config).is_err());
    }

    #[test]
    fn wrong_secret_rejected() {
        let mut other = test_config();
        other.secret = "a-completely-different-secret".to_string();

        let token = generate_access_token(1, "editor", &test_config()).unwrap();
        assert!(validate_token(&token, &other).is_err());
    }

    #[test]
    fn refresh_digest_is_stable_hex() {
        let (plaintext, digest) = generate_refresh_token();
        assert_eq!(digest, hash_refresh_token(&plaintext));
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn distinct_refresh_tokens() {
        let (a, _) = generate_refresh_token();
        let (b, _) = generate_refresh_token();
        assert_ne!(a, b);
    }
}
