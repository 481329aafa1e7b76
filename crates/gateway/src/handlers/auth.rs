//! Account and session handlers
//!
//! Credentials go straight to the identity provider; on success the gateway
//! mints its own session token carrying the profile and the provider access
//! token.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use adelante_catalog::Locale;
use adelante_common::{
    auth::{SessionClaims, SessionUser},
    errors::{AppError, Result},
    identity::SignUp,
    metrics,
};

/// Sign-up request
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,

    /// Preferred interface language
    #[serde(default)]
    pub locale: Locale,

    #[serde(default)]
    pub is_student: bool,
    #[serde(default)]
    pub is_alumni: bool,
}

/// Sign-in request
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Profile returned to the client
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub locale: Locale,
    pub is_student: bool,
    pub is_alumni: bool,
}

impl From<SessionUser> for ProfileResponse {
    fn from(user: SessionUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            locale: user.locale,
            is_student: user.is_student,
            is_alumni: user.is_alumni,
        }
    }
}

/// Session response: the gateway token plus the profile
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub expires_in_secs: u64,
    pub user: ProfileResponse,
}

/// Register a new account and open a session
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    request.validate().map_err(AppError::from)?;

    let registration = SignUp {
        email: request.email,
        password: request.password,
        first_name: request.first_name,
        last_name: request.last_name,
        locale: request.locale,
        is_student: request.is_student,
        is_alumni: request.is_alumni,
    };

    let session = state.identity.sign_up(&registration).await?;
    let token = state.jwt.issue(&session.user, &session.access_token)?;

    tracing::info!(user_id = %session.user.id, "Account created");
    metrics::record_sign_in(&state.config.identity.provider);

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token,
            expires_in_secs: state.config.session.ttl_secs,
            user: session.user.into(),
        }),
    ))
}

/// Open a session with existing credentials
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SessionResponse>> {
    request.validate().map_err(AppError::from)?;

    let session = state
        .identity
        .sign_in(&request.email, &request.password)
        .await?;
    let token = state.jwt.issue(&session.user, &session.access_token)?;

    tracing::info!(user_id = %session.user.id, "Signed in");
    metrics::record_sign_in(&state.config.identity.provider);

    Ok(Json(SessionResponse {
        token,
        expires_in_secs: state.config.session.ttl_secs,
        user: session.user.into(),
    }))
}

/// Revoke the provider session behind the current token
pub async fn sign_out(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<StatusCode> {
    state.identity.sign_out(&claims.provider_token).await?;

    tracing::info!(user_id = %claims.sub, "Signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// Confirm the session is still live with the provider and return the
/// current profile
pub async fn session(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<ProfileResponse>> {
    let user = state.identity.fetch_user(&claims.provider_token).await?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_validation() {
        let request = SignUpRequest {
            email: "not-an-email".into(),
            password: "hunter2hunter2".into(),
            first_name: None,
            last_name: None,
            locale: Locale::En,
            is_student: false,
            is_alumni: false,
        };
        assert!(request.validate().is_err());

        let request = SignUpRequest {
            email: "ana@example.edu".into(),
            password: "short".into(),
            first_name: None,
            last_name: None,
            locale: Locale::En,
            is_student: false,
            is_alumni: false,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_profile_from_session_user() {
        let user = SessionUser {
            id: Uuid::new_v4(),
            email: "ana@example.edu".into(),
            first_name: Some("Ana".into()),
            last_name: None,
            locale: Locale::Es,
            is_student: true,
            is_alumni: false,
        };

        let profile = ProfileResponse::from(user.clone());
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.locale, Locale::Es);
        assert!(profile.is_student);
    }
}
