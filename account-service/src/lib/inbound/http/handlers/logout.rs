use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    Json(body): Json<LogoutRequest>,
) -> Result<ApiSuccess<LogoutResponseData>, ApiError> {
    state
        .auth_service
        .revoke_refresh_token(&body.refresh_token)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData {
            message: "Logged out successfully".to_string(),
        },
    ))
}

#[derive(Clone, Deserialize)]
pub struct LogoutRequest {
    #[serde(alias = "refreshToken")]
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
