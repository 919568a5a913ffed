use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, SignupRequest},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    dto::MessageResponse,
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

// Same status and message for unknown email and wrong password.
fn invalid_credentials() -> ApiError {
    ApiError::auth("Invalid email or password")
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(payload) = payload?;

    if payload.email.is_empty() || payload.password.is_empty() || payload.username.is_empty() {
        warn!("signup with missing fields");
        return Err(ApiError::validation(
            "Email, password and username are required",
        ));
    }

    if state.users.email_exists(&payload.email).await? {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::conflict("Email already in use"));
    }

    if state.users.username_exists(&payload.username).await? {
        warn!(username = %payload.username, "username already registered");
        return Err(ApiError::conflict("Username already in use"));
    }

    let hash = hash_password(&payload.password)?;

    // A concurrent signup can still win between the checks and the insert;
    // the unique constraints turn that into a conflict.
    let user = state
        .users
        .create(&payload.email, &payload.username, &hash)
        .await?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(Json(MessageResponse::new("User created")))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(payload) = payload?;

    if payload.email.is_empty() || payload.password.is_empty() {
        warn!("login with missing fields");
        return Err(ApiError::validation("Email and password are required"));
    }

    let user = match state.users.find_by_email(&payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(invalid_credentials());
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(invalid_credentials());
    }

    let token = JwtKeys::from_ref(&state).sign(&user)?;

    info!(user_id = user.id, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        token,
        user: PublicUser {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        },
    }))
}
