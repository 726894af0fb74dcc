/// Errors raised while building a rule, before any value is validated.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid rule parameters: {0}")]
    InvalidParams(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
