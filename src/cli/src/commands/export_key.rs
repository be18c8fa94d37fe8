//! Export key command for the CLI wallet.

use crate::commands::require_wallet;
use crate::errors::WalletError;
use schain_core::KeyStore;
use tracing::{debug, info};

/// Runs the export-key command.
///
/// Returns the stored private key as hex without a `0x` prefix.
pub fn run(store: &KeyStore) -> Result<String, WalletError> {
    let wallet = require_wallet(store)?;
    debug!("Loaded wallet from {}", store.path().display());

    info!("Exported private key for {}", wallet.address());
    Ok(wallet.private_key().to_string())
}
