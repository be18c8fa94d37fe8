//! Commands for the CLI wallet.

pub mod airdrop;
pub mod balance;
pub mod create;
pub mod export_key;
pub mod transfer;

use crate::errors::WalletError;
use schain_core::{KeyStore, Wallet};

/// Loads the stored wallet, treating its absence as an error.
pub fn require_wallet(store: &KeyStore) -> Result<Wallet, WalletError> {
    store.load()?.ok_or(WalletError::WalletNotFound)
}
