use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    state
        .auth_service
        .refresh_access_token(&body.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|access_token| ApiSuccess::new(StatusCode::OK, RefreshResponseData { access_token }))
}

#[derive(Clone, Deserialize)]
pub struct RefreshRequest {
    #[serde(alias = "refreshToken")]
    refresh_token: String,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub access_token: String,
}
