//! Interactive menu and result reporting.
//!
//! Each action runs one command and reports its outcome on the console. A
//! failed action is reported and the menu carries on.

use crate::commands::{airdrop, balance, create, export_key, transfer};
use crate::console::Console;
use crate::errors::WalletError;
use crate::rpc::{render, RpcClient};
use colored::Colorize;
use schain_core::{CoreError, KeyStore};
use std::io;
use tracing::{error, info};

/// Token symbol shown next to amounts.
pub const TOKEN_SYMBOL: &str = "S";

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Create a wallet
    CreateWallet,
    /// Show the wallet's balance
    ShowBalance,
    /// Transfer tokens
    TransferTokens,
    /// Request test tokens
    RequestAirdrop,
    /// Leave the menu
    Exit,
}

impl MenuChoice {
    /// Parses the option number typed by the user.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::CreateWallet),
            "2" => Some(MenuChoice::ShowBalance),
            "3" => Some(MenuChoice::TransferTokens),
            "4" => Some(MenuChoice::RequestAirdrop),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Runs the menu until the user exits or input ends.
pub async fn run<C: Console>(console: &mut C, store: &KeyStore, rpc: &RpcClient) -> io::Result<()> {
    loop {
        console.println("");
        console.println(&format!("{}", "==== S Chain ====".magenta().bold()));
        console.println(&format!("{}", "1. Create Wallet".yellow()));
        console.println(&format!("{}", "2. Show Balance".yellow()));
        console.println(&format!("{}", "3. Transfer Tokens".yellow()));
        console.println(&format!("{}", "4. Request Airdrop".yellow()));
        console.println(&format!("{}", "5. Exit".yellow()));

        let input = match console.prompt(&format!("{}", "Select an option: ".cyan()))? {
            Some(input) => input,
            None => break,
        };

        match MenuChoice::parse(&input) {
            Some(MenuChoice::CreateWallet) => {
                create_wallet(console, store);
            }
            Some(MenuChoice::ShowBalance) => {
                show_balance(console, store, rpc).await;
            }
            Some(MenuChoice::TransferTokens) => {
                transfer_tokens(console, store, rpc).await?;
            }
            Some(MenuChoice::RequestAirdrop) => {
                request_airdrop(console, store, rpc).await;
            }
            Some(MenuChoice::Exit) => break,
            None => console.println(&format!("{}", "Invalid choice, try again.".red())),
        }
    }

    console.println(&format!("{}", "Exiting...".green()));
    Ok(())
}

/// Creates a wallet and reports where it was stored.
pub fn create_wallet<C: Console>(console: &mut C, store: &KeyStore) -> bool {
    match create::run(store) {
        Ok(wallet) => {
            console.println(&format!("{} {}", "Wallet Address:".green(), wallet.address().cyan()));
            console.println(&format!(
                "{} {}",
                "Wallet information saved to".green(),
                store.path().display()
            ));
            console.println(&format!(
                "{}",
                "WARNING: The private key is stored unencrypted. Keep this file safe and private!"
                    .red()
            ));
            true
        }
        Err(WalletError::Core(CoreError::AlreadyExists { address, .. })) => {
            console.println(&format!("{}", "Existing wallet found:".yellow()));
            console.println(&format!("{} {}", "Wallet Address:".cyan(), address));
            console.println(&format!("{}", "A wallet already exists. No new wallet created.".red()));
            false
        }
        Err(e) => report_failure(console, "Failed to create wallet", &e),
    }
}

/// Shows the address of the stored wallet.
pub fn show_address<C: Console>(console: &mut C, store: &KeyStore) -> bool {
    match crate::commands::require_wallet(store) {
        Ok(wallet) => {
            console.println(&format!("{} {}", "Wallet Address:".green(), wallet.address().cyan()));
            true
        }
        Err(e) => report_failure(console, "Failed to load wallet", &e),
    }
}

/// Shows the stored private key with a warning.
pub fn export_key<C: Console>(console: &mut C, store: &KeyStore) -> bool {
    match export_key::run(store) {
        Ok(key) => {
            console.println(&format!("{} {}", "Private Key:".green(), key));
            console.println(&format!("{}", "WARNING: Keep this key safe and private!".red()));
            true
        }
        Err(e) => report_failure(console, "Failed to export key", &e),
    }
}

/// Fetches and shows the wallet's balance.
pub async fn show_balance<C: Console>(console: &mut C, store: &KeyStore, rpc: &RpcClient) -> bool {
    if let Ok(Some(wallet)) = store.load() {
        console.println(&format!("{} {}", "Fetching balance for:".cyan(), wallet.address()));
    }

    match balance::run(rpc, store).await {
        Ok(balance) => {
            console.println(&format!("{} {} {}", "Balance:".green(), balance, TOKEN_SYMBOL));
            true
        }
        Err(e) => report_failure(console, "Failed to fetch balance", &e),
    }
}

/// Prompts for recipient and amount, then transfers.
pub async fn transfer_tokens<C: Console>(
    console: &mut C,
    store: &KeyStore,
    rpc: &RpcClient,
) -> io::Result<bool> {
    if let Err(e) = crate::commands::require_wallet(store) {
        return Ok(report_failure(console, "Cannot transfer", &e));
    }

    let to = match console.prompt(&format!("{}", "Enter recipient address: ".cyan()))? {
        Some(to) => to,
        None => return Ok(false),
    };
    let amount = match console.prompt(&format!("{}", "Enter amount to transfer: ".cyan()))? {
        Some(amount) => amount,
        None => return Ok(false),
    };

    Ok(transfer_to(console, store, rpc, &to, &amount).await)
}

/// Transfers `amount` tokens to `to` and reports the outcome.
pub async fn transfer_to<C: Console>(
    console: &mut C,
    store: &KeyStore,
    rpc: &RpcClient,
    to: &str,
    amount: &str,
) -> bool {
    match transfer::run(rpc, store, to, amount).await {
        Ok(receipt) => {
            info!("Transfer accepted: {}", receipt.tx_hash);
            console.println(&format!(
                "{} {}",
                "Transaction successful! Tx Hash:".green(),
                receipt.tx_hash
            ));
            true
        }
        Err(e) => report_failure(console, "Failed to process transaction", &e),
    }
}

/// Requests an airdrop and reports the node's answer.
pub async fn request_airdrop<C: Console>(console: &mut C, store: &KeyStore, rpc: &RpcClient) -> bool {
    if let Ok(Some(wallet)) = store.load() {
        console.println(&format!(
            "{}",
            format!("Requesting airdrop for wallet: {}...", wallet.address()).yellow()
        ));
    }

    match airdrop::run(rpc, store).await {
        Ok(result) => {
            console.println(&format!("{} {}", "Airdrop successful!".green(), render(&result)));
            true
        }
        Err(WalletError::Application(message)) => {
            console.println(&format!("{} {}", "Airdrop failed:".red(), message));
            false
        }
        Err(e) => report_failure(console, "Failed to claim airdrop", &e),
    }
}

fn report_failure<C: Console>(console: &mut C, context: &str, err: &WalletError) -> bool {
    error!("{}: {}", context, err);
    let line = match err {
        WalletError::WalletNotFound => err.to_string(),
        WalletError::Core(core) if core.is_user_input() => core.to_string(),
        _ => format!("{}. {}", context, err),
    };
    console.println(&format!("{}", line.red()));
    false
}
