//! Request extractor for the authenticated caller.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::auth::token;
use crate::common::AppState;
use crate::error::AppError;

/// The authenticated caller, decoded from the `Authorization: Bearer`
/// header. Handlers take this as an argument to require authentication.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub display_name: String,
    pub role: String,
}

impl CurrentUser {
    /// Rejects with 403 unless the caller's role is one of `allowed`.
    pub fn require_role(&self, allowed: &[&str]) -> Result<(), AppError> {
        if allowed.contains(&self.role.as_str()) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Access denied".to_string()))
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let bearer = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let claims = token::decode_claims(bearer, &state.config)?;

        Ok(Self {
            id: claims.usrid,
            display_name: claims.usrnamedisplay,
            role: claims.usrrolename,
        })
    }
}
