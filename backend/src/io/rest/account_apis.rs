//! # REST API for Bank Accounts
//!
//! Endpoints for opening, listing, reading, updating and deleting accounts.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use tracing::info;

use crate::io::rest::{error::ApiError, mappers::AccountMapper};
use crate::AppState;
use shared::{AccountListQuery, BankAccountRequest, BankAccountResponse};

/// Open a new account
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<BankAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BankAccountResponse>), ApiError> {
    let Json(request) = payload?;
    info!("POST /v1/accounts - request: {:?}", request);

    let account = state
        .account_service
        .create_account(AccountMapper::to_create_command(request))
        .await?;

    Ok((StatusCode::CREATED, Json(AccountMapper::to_dto(account))))
}

/// List accounts a page at a time
pub async fn list_accounts(
    State(state): State<AppState>,
    query: Result<Query<AccountListQuery>, QueryRejection>,
) -> Result<Json<Vec<BankAccountResponse>>, ApiError> {
    let Query(query) = query?;
    info!("GET /v1/accounts - query: {:?}", query);

    let accounts = state
        .account_service
        .list_accounts(AccountMapper::to_list_query(query))
        .await?;

    Ok(Json(accounts.into_iter().map(AccountMapper::to_dto).collect()))
}

/// Get an account by ID
pub async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<Json<BankAccountResponse>, ApiError> {
    info!("GET /v1/accounts/{}", account_id);

    let account = state.account_service.get_account(account_id).await?;
    Ok(Json(AccountMapper::to_dto(account)))
}

/// Update an account's details. The balance in the body is ignored.
pub async fn update_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
    payload: Result<Json<BankAccountRequest>, JsonRejection>,
) -> Result<Json<BankAccountResponse>, ApiError> {
    let Json(request) = payload?;
    info!("PUT /v1/accounts/{} - request: {:?}", account_id, request);

    let account = state
        .account_service
        .update_account(account_id, AccountMapper::to_update_command(request))
        .await?;

    Ok(Json(AccountMapper::to_dto(account)))
}

/// Delete an account without history
pub async fn delete_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    info!("DELETE /v1/accounts/{}", account_id);

    state.account_service.delete_account(account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
