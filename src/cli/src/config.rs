//! Configuration for the CLI wallet.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Public endpoint used when nothing else is configured.
pub const DEFAULT_RPC_URL: &str = "https://mainnet-beta.schain.fun";

/// Environment variable overriding the RPC base URL.
pub const RPC_URL_ENV: &str = "RPC_URL";

/// Configuration for the CLI wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Base URL of the node's RPC service
    pub rpc_url: String,
    /// Timeout for a single RPC call, in seconds
    pub timeout_secs: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl WalletConfig {
    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(RPC_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                debug!("Using RPC URL from {}: {}", RPC_URL_ENV, url);
                self.rpc_url = url.to_string();
            }
        }
    }

    /// Gets the per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Name of the wallet file.
pub const WALLET_FILE: &str = "wallet.json";

/// Gets the default location of the wallet file.
///
/// A `wallet.json` in the working directory wins over the per-user data
/// directory, so wallets created next to the program keep working.
pub fn default_wallet_path() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    default_wallet_path_in(&cwd)
}

/// Gets the default wallet location as seen from `dir`.
pub fn default_wallet_path_in(dir: &Path) -> PathBuf {
    let local = dir.join(WALLET_FILE);
    if local.is_file() {
        debug!("Using wallet file {}", local.display());
        return local;
    }

    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("schain");
    path.push(WALLET_FILE);
    path
}
