//! Error types for the core crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Error when a wallet is already stored and would be overwritten.
    #[error("A wallet already exists at {path} with address {address}")]
    AlreadyExists {
        /// Location of the stored wallet
        path: PathBuf,
        /// Address of the stored wallet
        address: String,
    },

    /// Error when the stored wallet cannot be read back.
    #[error("Wallet storage at {path} is corrupt: {reason}")]
    CorruptState {
        /// Location of the stored wallet
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Error when an address is not a well-formed account address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Error when an amount cannot be parsed or is not positive.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Error when an amount has more fractional digits than the token supports.
    #[error("Amount cannot have more than {max} decimal places (got {actual})")]
    PrecisionExceeded {
        /// The maximum number of fractional digits
        max: u32,
        /// The number of fractional digits entered
        actual: u32,
    },

    /// Error when producing or checking a signature fails.
    #[error("Signature error: {0}")]
    Signing(String),

    /// Error when serialization or deserialization fails.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error when a file operation fails.
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Whether the error was caused by user input and the user can simply try again.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidAddress(_)
                | CoreError::InvalidAmount(_)
                | CoreError::PrecisionExceeded { .. }
        )
    }
}
