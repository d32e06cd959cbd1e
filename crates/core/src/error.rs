#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A single request field failed validation. `field` is the name reported
    /// to the caller, which may differ from the wire name.
    #[error("Invalid field {field}: {message}")]
    InvalidField { field: &'static str, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
