use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims minted by the identity service.
///
/// `sub` is the user's UUID; `name` carries the display name picked at
/// registration, when the provider knows one.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The auth user UUID.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    /// Issuer.
    pub iss: Option<String>,
    /// User's email.
    pub email: Option<String>,
    /// Display name, when the identity provider knows one.
    pub name: Option<String>,
}

impl Claims {
    /// Extract the user UUID from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid UUID in sub claim: {e}"))
    }

    pub fn display_name(&self) -> Option<String> {
        self.name.clone()
    }

    pub fn user_email(&self) -> Option<String> {
        self.email.clone()
    }
}

/// Validate an HS256 JWT against the configured secret and return the
/// decoded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|td| td.claims)
    .map_err(|e| format!("Token validation failed: {e:?}"))
}
