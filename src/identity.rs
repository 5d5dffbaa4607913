//! Identity token verification.
//!
//! Users sign in with an external identity provider, which issues HS256
//! JWTs. This service only verifies them; it never issues tokens in production.

use serde::{Deserialize, Serialize};

/// Claims read from an identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user's stable account id.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// A verified caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity token rejected: {0}")]
    Rejected(#[from] jsonwebtoken::errors::Error),

    #[error("identity token has an empty subject")]
    EmptySubject,
}

/// Verifies identity tokens against the shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: jsonwebtoken::DecodingKey,
    validation: jsonwebtoken::Validation,
}

impl TokenVerifier {
    /// Create a verifier for HS256 tokens.
    ///
    /// When `issuer` or `audience` are given, tokens must carry matching claims.
    pub fn new(secret: &str, issuer: Option<&str>, audience: Option<&str>) -> Self {
        let mut validation = jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: jsonwebtoken::DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and extract the caller's identity.
    /// Returns Err if the token is invalid, expired, or tampered with.
    pub fn verify(&self, token: &str) -> Result<Identity, IdentityError> {
        let claims =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        if claims.sub.trim().is_empty() {
            return Err(IdentityError::EmptySubject);
        }

        Ok(Identity {
            user_id: claims.sub,
        })
    }
}

/// Sign a token the way the identity provider does. Test-only.
#[cfg(test)]
pub fn issue_test_token(secret: &str, user_id: &str, expire_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + expire_secs,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
