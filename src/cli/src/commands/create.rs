//! Create wallet command for the CLI wallet.

use crate::errors::WalletError;
use schain_core::{KeyStore, Wallet};
use tracing::info;

/// Runs the create command.
///
/// Fails with `AlreadyExists` when a wallet is already stored; the existing
/// wallet is never overwritten.
pub fn run(store: &KeyStore) -> Result<Wallet, WalletError> {
    let wallet = store.generate()?;
    info!("Wallet saved to {}", store.path().display());
    Ok(wallet)
}
