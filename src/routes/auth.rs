//! Login, token refresh, identity echo and the login audit listing.
//!
//! Every login call writes exactly one audit row, whatever the outcome.

use axum::{Json, extract::State, http::HeaderMap};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{extract::CurrentUser, login_outcome, token};
use crate::common::AppState;
use crate::entity::{login_attempts, users};
use crate::error::{AppError, AppResult};

/// Role allowed to read the audit log.
const ROLE_ADMIN: &str = "admin";

/// How many audit rows the listing returns.
const ATTEMPTS_PAGE_SIZE: u64 = 100;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

impl From<users::Model> for UserSummary {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: UserSummary,
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Tokens and identity summary", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = users::Entity::find()
        .filter(users::Column::Email.eq(body.email.as_str()))
        .one(&state.auth)
        .await?;

    let outcome = login_outcome(user.as_ref(), &body.password);

    let audit = login_attempts::ActiveModel {
        user_id: Set(outcome.user_id),
        email: Set(body.email.clone()),
        success: Set(outcome.success),
        reason: Set(outcome.reason.map(str::to_string)),
        client_ip: Set(extract_client_ip(&headers)),
        attempted_at: Set(Utc::now().into()),
        ..Default::default()
    };
    audit.insert(&state.auth).await?;

    match (outcome.success, user) {
        (true, Some(user)) => {
            let access_token = token::issue_access_token(&user, &state.config)?;
            let refresh_token = token::issue_refresh_token(&user, &state.config)?;
            tracing::info!(user_id = user.id, "Login succeeded");

            Ok(Json(LoginResponse {
                access_token,
                refresh_token,
                token_type: "bearer".to_string(),
                user: UserSummary::from(user),
            }))
        }
        _ => {
            tracing::warn!(email = %body.email, reason = ?outcome.reason, "Login refused");
            Err(AppError::Unauthorized("Invalid credentials".to_string()))
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Fresh access token", body = RefreshResponse),
        (status = 401, description = "Invalid or expired refresh token"),
    ),
    tag = "auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> AppResult<Json<RefreshResponse>> {
    let claims = token::decode_claims(&body.refresh_token, &state.config)?;

    let user = users::Entity::find_by_id(claims.usrid)
        .one(&state.auth)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    if !user.is_active {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let access_token = token::issue_access_token(&user, &state.config)?;
    Ok(Json(RefreshResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Identity behind the presented bearer token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The caller's identity", body = UserSummary),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Account no longer exists"),
    ),
    tag = "auth"
)]
pub async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<UserSummary>> {
    let record = users::Entity::find_by_id(user.id)
        .one(&state.auth)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))?;

    Ok(Json(UserSummary::from(record)))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttemptResponse {
    pub id: i32,
    pub user_id: Option<i32>,
    pub email: String,
    pub success: bool,
    pub reason: Option<String>,
    pub client_ip: Option<String>,
    pub attempted_at: String,
}

impl From<login_attempts::Model> for AttemptResponse {
    fn from(row: login_attempts::Model) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            email: row.email,
            success: row.success,
            reason: row.reason,
            client_ip: row.client_ip,
            attempted_at: row.attempted_at.to_rfc3339(),
        }
    }
}

/// Recent login attempts, newest first (admin only)
#[utoipa::path(
    get,
    path = "/api/auth/attempts",
    responses(
        (status = 200, description = "Most recent audit rows", body = Vec<AttemptResponse>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
    ),
    tag = "auth"
)]
pub async fn attempts(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<AttemptResponse>>> {
    user.require_role(&[ROLE_ADMIN])?;

    let rows = login_attempts::Entity::find()
        .order_by_desc(login_attempts::Column::AttemptedAt)
        .limit(ATTEMPTS_PAGE_SIZE)
        .all(&state.auth)
        .await?;

    Ok(Json(rows.into_iter().map(AttemptResponse::from).collect()))
}

fn extract_client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        })
}
