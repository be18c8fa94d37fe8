//! CLI wallet for the S Chain network.

pub mod commands;
pub mod config;
pub mod console;
pub mod errors;
pub mod menu;
pub mod rpc;

// Re-export commonly used types and functions
pub use commands::{airdrop, balance, create, export_key, transfer};
pub use config::WalletConfig;
pub use console::{Console, Terminal};
pub use errors::WalletError;
pub use rpc::RpcClient;
