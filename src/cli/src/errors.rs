//! Error types for the CLI wallet.

use schain_core::CoreError;
use thiserror::Error;

/// Errors that can occur in the CLI wallet.
#[derive(Error, Debug)]
pub enum WalletError {
    /// Error raised by key storage, amount parsing or signing.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Error when an operation needs a wallet and none is stored.
    #[error("No wallet found. Please create a wallet first.")]
    WalletNotFound,

    /// Error when the request did not get a usable HTTP answer.
    #[error("Transport error: {message}")]
    Transport {
        /// HTTP status, if the node answered at all
        status: Option<u16>,
        /// The response body or the underlying cause
        message: String,
    },

    /// Error reported by the node in the `error` field of a response.
    #[error("Node returned error: {0}")]
    Application(String),

    /// Error when a successful response does not have the expected shape.
    #[error("Invalid response from node: {0}")]
    InvalidResponse(String),

    /// Error when the configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WalletError {
    /// Builds a transport error from a failed request.
    pub fn transport<E: ToString>(cause: E) -> Self {
        WalletError::Transport {
            status: None,
            message: cause.to_string(),
        }
    }
}
