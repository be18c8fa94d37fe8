//! Airdrop command for the CLI wallet.

use super::require_wallet;
use crate::errors::WalletError;
use crate::rpc::{RpcClient, AIRDROP_ID};
use schain_core::KeyStore;
use serde_json::{json, Value};
use tracing::info;

/// Runs the airdrop command, returning whatever the node reports.
pub async fn run(rpc: &RpcClient, store: &KeyStore) -> Result<Value, WalletError> {
    let wallet = require_wallet(store)?;
    info!("Requesting airdrop for {}", wallet.address());

    rpc.call("requestAirdrop", json!([wallet.address()]), AIRDROP_ID)
        .await
}
