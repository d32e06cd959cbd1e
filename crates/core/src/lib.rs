//! Domain logic for the climate monitor reading intake.
//!
//! Pure types and checks with no HTTP or runtime dependencies: the reading
//! payload, firmware version grammar, device secret validation, and alert
//! evaluation.

pub mod alert;
pub mod device_secret;
pub mod error;
pub mod firmware;
pub mod reading;
