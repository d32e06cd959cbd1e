//! Device shared-secret extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use climate_core::device_secret::{DEVICE_SECRET_HEADER, INVALID_SECRET_MESSAGE};
use climate_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried a device secret accepted by the
/// configured [`SecretValidator`](climate_core::device_secret::SecretValidator).
///
/// Put it before any body extractor so authentication runs first:
///
/// ```ignore
/// async fn my_handler(_device: AuthenticatedDevice, Json(body): Json<T>) -> AppResult<()> {
///     Ok(())
/// }
/// ```
///
/// The header value is handed to the validator exactly as received, as long
/// as it is valid UTF-8. A missing header, a value that is not UTF-8, and a
/// rejected secret all produce the same 401 response.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedDevice;

impl FromRequestParts<AppState> for AuthenticatedDevice {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(DEVICE_SECRET_HEADER) else {
            tracing::warn!("Reading rejected: device secret header missing");
            return Err(invalid_secret());
        };

        let accepted = std::str::from_utf8(header.as_bytes())
            .is_ok_and(|secret| state.secret_validator.validate_device_secret(secret));

        if !accepted {
            tracing::warn!("Reading rejected: device secret not accepted");
            return Err(invalid_secret());
        }

        Ok(AuthenticatedDevice)
    }
}

fn invalid_secret() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_SECRET_MESSAGE.into()))
}
