use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegCfError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid fiscal year end: {0}")]
    InvalidFiscalYearEnd(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RegCfError {
    fn from(e: serde_json::Error) -> Self {
        RegCfError::SerializationError(e.to_string())
    }
}

impl From<chrono::ParseError> for RegCfError {
    fn from(e: chrono::ParseError) -> Self {
        RegCfError::DateError(e.to_string())
    }
}
