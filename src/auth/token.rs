//! Signed bearer tokens (HS256). Access tokens are short-lived; refresh
//! tokens carry the same claims with a longer expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Config;
use crate::entity::users;
use crate::error::{AppError, AppResult};

/// Claims carried by every token. The field names are the wire contract
/// with the dashboard frontend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User id.
    pub usrid: i32,
    /// Display name shown in the dashboard header.
    pub usrnamedisplay: String,
    /// Role name checked by authorization guards.
    pub usrrolename: String,
    /// Issued at (Unix timestamp).
    pub iat: usize,
    /// Expiry (Unix timestamp).
    pub exp: usize,
}

pub fn issue_access_token(user: &users::Model, config: &Config) -> AppResult<String> {
    issue(user, Duration::minutes(config.access_token_minutes), config)
}

pub fn issue_refresh_token(user: &users::Model, config: &Config) -> AppResult<String> {
    issue(user, Duration::days(config.refresh_token_days), config)
}

fn issue(user: &users::Model, lifetime: Duration, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        usrid: user.id,
        usrnamedisplay: user.display_name.clone(),
        usrrolename: user.role.clone(),
        iat: now.timestamp() as usize,
        exp: (now + lifetime).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to issue token: {e}")))
}

/// Decodes and validates a bearer token. Signature or expiry failures both
/// come back as the same 401 so callers learn nothing about which check
/// failed.
pub fn decode_claims(token: &str, config: &Config) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid credentials".to_string()))
}
