//! Error types for the ledger

use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger errors
#[derive(Error, Debug)]
pub enum Error {
    /// Referenced user does not exist
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Receipt hash has already been processed
    #[error("Duplicate receipt: {0}")]
    DuplicateReceipt(String),

    /// Debit exceeds the user's DROP balance
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Amount the caller asked to debit
        requested: u64,
        /// Balance at the time of the check
        available: u64,
    },

    /// Credit would overflow the user's DROP balance
    #[error("Balance overflow: crediting {credit} exceeds DROP balance capacity")]
    BalanceOverflow {
        /// Amount that could not be credited
        credit: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True for the expected, caller-recoverable conditions
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::UserNotFound(_)
                | Error::DuplicateReceipt(_)
                | Error::InsufficientBalance { .. }
                | Error::BalanceOverflow { .. }
        )
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
