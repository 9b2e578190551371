//! Login handler

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::{error::ApiError, extract::JsonOrForm, models::LoginRequest, state::AppState};

/// Body of every failed login
#[derive(Serialize, ToSchema)]
#[schema(example = json!({ "msg": "Login Unsuccessful" }))]
pub struct LoginFailure {
    pub msg: String,
}

/// Login failure; unknown credentials and internal faults look the same
#[derive(Debug)]
pub enum AuthError {
    LoginUnsuccessful,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::LoginUnsuccessful => {
                let body = Json(LoginFailure {
                    msg: "Login Unsuccessful".to_string(),
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
        }
    }
}

/// Login users
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login Successfully, signed token", body = String),
        (status = 404, description = "Login Unsuccessful", body = LoginFailure)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<JsonOrForm<LoginRequest>, ApiError>,
) -> Result<impl IntoResponse, AuthError> {
    let JsonOrForm(payload) = payload.map_err(|e| {
        info!("Rejected login body: {}", e);
        AuthError::LoginUnsuccessful
    })?;

    info!("Login attempt for user: {}", payload.username);

    let user = state
        .user_directory
        .find(&payload.username, &payload.password)
        .ok_or_else(|| {
            info!("Login failed for user: {}", payload.username);
            AuthError::LoginUnsuccessful
        })?;

    let token = state.jwt_service.generate_token(&user).map_err(|e| {
        error!("Failed to generate token: {}", e);
        AuthError::LoginUnsuccessful
    })?;

    Ok((StatusCode::OK, Json(token)))
}
