//! Balance command for the CLI wallet.

use super::require_wallet;
use crate::errors::WalletError;
use crate::rpc::{RpcClient, BALANCE_ID};
use schain_core::{format_base_units, KeyStore};
use serde_json::{json, Value};
use std::fmt;
use tracing::{debug, info};

/// Balance of the stored wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    /// The queried address
    pub address: String,
    /// The balance in base units
    pub units: u128,
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_base_units(self.units))
    }
}

/// Runs the balance command.
pub async fn run(rpc: &RpcClient, store: &KeyStore) -> Result<Balance, WalletError> {
    let wallet = require_wallet(store)?;
    info!("Getting balance for address: {}", wallet.address());

    let result = rpc
        .call("getBalance", json!([wallet.address(), "latest"]), BALANCE_ID)
        .await?;
    let units = parse_balance(&result)?;
    debug!("Balance in base units: {}", units);

    Ok(Balance {
        address: wallet.address().to_string(),
        units,
    })
}

/// Parses the hex quantity returned by `getBalance`.
pub fn parse_balance(result: &Value) -> Result<u128, WalletError> {
    let text = result
        .as_str()
        .ok_or_else(|| WalletError::InvalidResponse(format!("Invalid balance format: {}", result)))?;
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    u128::from_str_radix(digits, 16)
        .map_err(|e| WalletError::InvalidResponse(format!("Invalid balance '{}': {}", text, e)))
}
