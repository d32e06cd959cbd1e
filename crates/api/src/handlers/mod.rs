//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate to `climate_core` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod readings;
