//! Session verification middleware
//!
//! Verifies the bearer token on every protected request and attaches the
//! decoded user and claims to the request extensions. Handlers take
//! `SessionUser` as an argument; sign-out additionally reads the claims for
//! the embedded provider token.

use crate::AppState;
use adelante_common::{
    auth::extract_bearer,
    errors::{AppError, Result},
};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing Authorization header".to_string(),
        })?;

    let token = extract_bearer(header).ok_or_else(|| AppError::Unauthorized {
        message: "Expected a bearer token".to_string(),
    })?;

    let claims = state.jwt.verify(token)?;
    let user = claims.user()?;

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
