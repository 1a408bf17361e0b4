//! # REST API Interface Layer
//!
//! HTTP endpoints for the Eagle Bank backend.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: axum handlers for transactions, accounts and users
//! - **Input Validation**: malformed JSON and out-of-range fields are rejected
//!   with 400 before the domain layer is called
//! - **Error Handling**: every failure is rendered as `{"error": "..."}`
//! - **Logging**: one line per request with the route and payload
//!
//! Handlers hold no business logic; they translate and delegate.

pub mod account_apis;
pub mod error;
pub mod mappers;
pub mod transaction_apis;
pub mod user_apis;

pub use account_apis::*;
pub use error::ApiError;
pub use transaction_apis::*;
pub use user_apis::*;
