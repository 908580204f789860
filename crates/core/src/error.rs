/// Domain-level validation failures.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required request field was absent or empty.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),
}
