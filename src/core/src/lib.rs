//! Core primitives for the S Chain wallet.
//!
//! This crate provides the pieces of the transfer pipeline that do not touch
//! the network: key storage, conversion of entered amounts into base units,
//! and signing of transfer requests.

pub mod amount;
pub mod errors;
pub mod keystore;
pub mod signer;
pub mod types;

// Re-export commonly used types
pub use amount::{format_base_units, to_base_units, BaseUnits};
pub use errors::CoreError;
pub use keystore::KeyStore;
pub use types::{parse_address, SignedPayload, TransferRequest, Wallet};
