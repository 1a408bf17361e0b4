//! # Eagle Bank Backend
//!
//! REST service for users, bank accounts and the deposits and withdrawals
//! that move account balances.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum handlers, DTO mapping, error translation)
//!     ↓
//! Domain Layer (transaction processor, account and user services)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```
//!
//! [`initialize_backend`] wires the services onto a database connection and
//! [`create_router`] exposes them over HTTP.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

#[cfg(test)]
mod test_utils;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::domain::{AccountLocks, AccountService, TransactionProcessor, UserService};
use crate::storage::DbConnection;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub transaction_processor: TransactionProcessor<DbConnection>,
    pub account_service: AccountService<DbConnection>,
    pub user_service: UserService<DbConnection>,
}

/// Build the services on top of an open database connection
pub fn initialize_backend(db_conn: DbConnection) -> AppState {
    info!("Setting up domain services");
    let db_conn = Arc::new(db_conn);
    // Balance changes and account deletion must contend on the same locks.
    let locks = AccountLocks::new();

    AppState {
        transaction_processor: TransactionProcessor::new(db_conn.clone(), locks.clone()),
        account_service: AccountService::new(db_conn.clone(), locks),
        user_service: UserService::new(db_conn),
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let v1_routes = Router::new()
        .route("/accounts/:account_id/transactions/deposit", post(io::deposit))
        .route("/accounts/:account_id/transactions/withdraw", post(io::withdraw))
        .route("/accounts/:account_id/transactions", get(io::list_account_transactions))
        .route("/transactions/:transaction_id", get(io::get_transaction))
        .route("/accounts", get(io::list_accounts).post(io::create_account))
        .route(
            "/accounts/:account_id",
            get(io::get_account).put(io::update_account).delete(io::delete_account),
        );

    Ok(Router::new()
        .nest("/v1", v1_routes)
        .route("/users", post(io::create_user))
        .route("/users/:user_id", get(io::get_user).put(io::update_user))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
