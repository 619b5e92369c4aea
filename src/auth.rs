/// Password hashing, token issuance, and authentication extractors
use crate::{context::AppContext, error::ApiError, models::Admin};
use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token scope for admin console access
pub const SCOPE_ADMIN: &str = "admin";
/// Token scope for owner sessions
pub const SCOPE_OWNER: &str = "owner";

/// JWT claims carried by issued tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin username or owner email
    pub sub: String,
    pub scope: String,
    pub iat: i64,
    pub exp: i64,
}

/// Hash a password with Argon2id and a fresh random salt
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(hash)
}

/// Verify a password against a stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> Result<bool, ApiError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| ApiError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Issue a signed, expiring bearer token
pub fn issue_token(
    subject: &str,
    scope: &str,
    ttl_minutes: i64,
    jwt_secret: &str,
) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: subject.to_string(),
        scope: scope.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Token signing failed: {}", e)))
}

/// Verify a bearer token with full validation
///
/// Checks the signature, expiration (with 5 minutes of clock-skew
/// leeway), and returns the decoded claims.
pub fn verify_token(token: &str, jwt_secret: &str) -> Result<Claims, ApiError> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 300;

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::warn!("Token verification failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    ApiError::Authentication("Token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    ApiError::Authentication("Invalid token signature".to_string())
                }
                _ => ApiError::Authentication(format!("Invalid token: {}", e)),
            }
        })
}

/// Admin authentication context - requires a valid admin-scoped token
///
/// The token's subject is re-resolved against the admin table on every
/// request, so revoked admins are locked out as soon as their row is
/// gone.
#[derive(Debug, Clone)]
pub struct AdminAuthContext {
    pub admin: Admin,
}

#[async_trait]
impl FromRequestParts<AppContext> for AdminAuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = crate::api::middleware::extract_bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::Authentication("Missing authorization header".to_string()))?;

        let claims = verify_token(&token, &state.config.auth.jwt_secret)?;

        if claims.scope != SCOPE_ADMIN {
            return Err(ApiError::Authentication(
                "Token does not have admin scope".to_string(),
            ));
        }

        let admin = state
            .storage
            .get_admin_by_username(&claims.sub)
            .await?
            .ok_or_else(|| ApiError::Authentication("Unknown admin".to_string()))?;

        Ok(AdminAuthContext { admin })
    }
}
