use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuccessionError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A percentage field outside the range the form accepts.
    #[error("{field} = {value}% is outside the accepted range {min}%..={max}%")]
    RateOutOfRange {
        field: String,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SuccessionError {
    fn from(e: serde_json::Error) -> Self {
        SuccessionError::SerializationError(e.to_string())
    }
}
