//! # REST API for Transactions
//!
//! Deposits, withdrawals and transaction lookups. The route decides whether a
//! request is a deposit or a withdrawal; the body's `type` is only required
//! to be present.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use rust_decimal::Decimal;
use tracing::info;

use crate::io::rest::{error::ApiError, mappers::TransactionMapper};
use crate::AppState;
use shared::{TransactionRequest, TransactionResponse};

pub const MAX_DESCRIPTION_LENGTH: usize = 255;

/// Smallest amount a client may move: one cent
fn minimum_amount() -> Decimal {
    Decimal::new(1, 2)
}

fn validate_request(request: &TransactionRequest) -> Result<(), ApiError> {
    if request.amount < minimum_amount() {
        return Err(ApiError::BadRequest(format!(
            "Amount must be at least {}, got {}",
            minimum_amount(),
            request.amount
        )));
    }
    if let Some(description) = &request.description {
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(ApiError::BadRequest(format!(
                "Description must be at most {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }
    }
    Ok(())
}

/// Deposit money into an account
pub async fn deposit(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let Json(request) = payload?;
    info!("POST /v1/accounts/{}/transactions/deposit - request: {:?}", account_id, request);
    validate_request(&request)?;

    let transaction = state
        .transaction_processor
        .deposit(TransactionMapper::to_command(account_id, request))
        .await?;

    Ok(Json(TransactionMapper::to_dto(transaction)))
}

/// Withdraw money from an account
pub async fn withdraw(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let Json(request) = payload?;
    info!("POST /v1/accounts/{}/transactions/withdraw - request: {:?}", account_id, request);
    validate_request(&request)?;

    let transaction = state
        .transaction_processor
        .withdraw(TransactionMapper::to_command(account_id, request))
        .await?;

    Ok(Json(TransactionMapper::to_dto(transaction)))
}

/// Get a single transaction
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<i64>,
) -> Result<Json<TransactionResponse>, ApiError> {
    info!("GET /v1/transactions/{}", transaction_id);

    let transaction = state
        .transaction_processor
        .get_transaction_by_id(transaction_id)
        .await?;

    Ok(Json(TransactionMapper::to_dto(transaction)))
}

/// List an account's transactions, oldest first
pub async fn list_account_transactions(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<TransactionResponse>>, ApiError> {
    info!("GET /v1/accounts/{}/transactions", account_id);

    let transactions = state
        .transaction_processor
        .get_transactions_for_account(account_id)
        .await?;

    Ok(Json(transactions.into_iter().map(TransactionMapper::to_dto).collect()))
}
