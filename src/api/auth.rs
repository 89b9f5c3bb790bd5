use axum::{extract::State, http::StatusCode, Json};

use crate::domain::{DomainError, User};
use crate::infrastructure::auth::AuthUser;
use crate::infrastructure::AppState;
use crate::services::{account_service, LoginRequest, RegisterRequest, TokenResponse};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), DomainError> {
    let user = account_service::register(state.user_repo.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, DomainError> {
    tracing::info!("Login attempt for user: {}", payload.username);
    let token = account_service::login(state.user_repo.as_ref(), payload).await?;
    Ok(Json(token))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer" = []))
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<User>, DomainError> {
    let me = account_service::me(state.user_repo.as_ref(), user.id).await?;
    Ok(Json(me))
}
