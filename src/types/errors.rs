use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValueError {
    #[error("Value error: {0}")]
    InvalidFormat(String),
    #[error("Value error: {0}")]
    Decimal(#[from] rust_decimal::Error),
    #[error("Value error: value [{0}] must not be negative")]
    Negative(String),
    #[error("Value error: value [{0}] is out of range")]
    OutOfRange(String)
}
