//! Request handlers.
//!
//! Handlers delegate to the repository in `estimation_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod estimation_request;
pub mod status_options;
