//! Request extractors that guard handlers.
//!
//! - [`device_secret::AuthenticatedDevice`] -- Requires a valid device secret header.

pub mod device_secret;
