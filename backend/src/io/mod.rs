//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services.
//!
//! Requests arrive as `shared` DTOs, are checked for shape and bounds, mapped
//! to domain commands, and the domain's answers are mapped back to DTOs.
//! Domain errors are translated to HTTP status codes in one place
//! ([`rest::error::ApiError`]).
//!
//! ## Supported Operations
//!
//! - **POST /v1/accounts/:id/transactions/deposit**: deposit into an account
//! - **POST /v1/accounts/:id/transactions/withdraw**: withdraw from an account
//! - **GET /v1/transactions/:id**: fetch one transaction
//! - **GET /v1/accounts/:id/transactions**: an account's history
//! - **/v1/accounts**: account create, list, read, update, delete
//! - **/users**: user create, read, update

pub mod rest;

pub use rest::*;
