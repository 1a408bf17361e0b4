//! # REST API for Users

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use tracing::info;

use crate::io::rest::{error::ApiError, mappers::UserMapper};
use crate::AppState;
use shared::{UserRequest, UserResponse};

/// Create a user
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(request) = payload?;
    info!("POST /users - request: {:?}", request);

    let user = state.user_service.create_user(UserMapper::to_command(request)).await?;
    Ok(Json(UserMapper::to_dto(user)))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    info!("GET /users/{}", user_id);

    let user = state.user_service.get_user(user_id).await?;
    Ok(Json(UserMapper::to_dto(user)))
}

/// Replace a user's details
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(request) = payload?;
    info!("PUT /users/{} - request: {:?}", user_id, request);

    let user = state
        .user_service
        .update_user(user_id, UserMapper::to_command(request))
        .await?;
    Ok(Json(UserMapper::to_dto(user)))
}
