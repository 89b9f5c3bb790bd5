//! Account Service - registration, login and profile lookup

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DomainError, User, UserRepository};
use crate::infrastructure::auth::{create_jwt, hash_password, verify_password};

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn register(
    users: &dyn UserRepository,
    request: RegisterRequest,
) -> Result<User, DomainError> {
    let username = request.username.trim();
    if username.is_empty() {
        return Err(DomainError::validation("username", "This field may not be blank."));
    }
    let email = request.email.trim();
    if !email.contains('@') {
        return Err(DomainError::validation("email", "Enter a valid email address."));
    }
    if request.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::validation(
            "password",
            format!(
                "Ensure this field has at least {} characters.",
                MIN_PASSWORD_LENGTH
            ),
        ));
    }

    let password_hash = hash_password(&request.password).map_err(DomainError::Internal)?;
    let user = users
        .create(username.to_string(), email.to_lowercase(), password_hash)
        .await?;
    tracing::info!("Registered user {} ({})", user.id, user.username);
    Ok(user)
}

/// Exchange credentials for a bearer token. Unknown user and wrong password look the same.
pub async fn login(
    users: &dyn UserRepository,
    request: LoginRequest,
) -> Result<TokenResponse, DomainError> {
    let credentials = users
        .find_credentials(request.username.trim())
        .await?
        .ok_or(DomainError::Unauthorized)?;

    let valid = verify_password(&request.password, &credentials.password_hash)
        .map_err(DomainError::Internal)?;
    if !valid {
        tracing::debug!("Failed login for {}", credentials.user.username);
        return Err(DomainError::Unauthorized);
    }

    let token = create_jwt(credentials.user.id, &credentials.user.username)
        .map_err(DomainError::Internal)?;
    Ok(TokenResponse { token })
}

pub async fn me(users: &dyn UserRepository, user_id: i32) -> Result<User, DomainError> {
    users.find_by_id(user_id).await?.ok_or(DomainError::NotFound)
}
