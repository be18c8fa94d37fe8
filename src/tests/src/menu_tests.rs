//! Tests for the interactive menu driven by scripted input.

use cli::{menu, Console, RpcClient, WalletConfig};
use httpmock::prelude::*;
use schain_core::KeyStore;
use serde_json::json;
use std::collections::VecDeque;
use std::io;
use tempfile::tempdir;
use tokio::runtime::Runtime;

/// Console fed from a list of lines, recording everything shown.
struct ScriptedConsole {
    inputs: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            output: Vec::new(),
        }
    }

    fn shows(&self, text: &str) -> bool {
        self.output.iter().any(|line| line.contains(text))
    }
}

impl Console for ScriptedConsole {
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.push(prompt.to_string());
        Ok(self.inputs.pop_front())
    }

    fn println(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}

fn offline_client() -> RpcClient {
    let config = WalletConfig {
        rpc_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 1,
    };
    RpcClient::new(&config).unwrap()
}

/// Tests creating a wallet twice from the menu.
#[test]
fn test_menu_create_wallet_twice() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let store = KeyStore::new(dir.path().join("wallet.json"));
    let rpc = offline_client();

    let mut console = ScriptedConsole::new(&["1", "1", "5"]);
    rt.block_on(menu::run(&mut console, &store, &rpc)).unwrap();

    let wallet = store.load().unwrap().unwrap();
    assert!(console.shows(wallet.address()));
    assert!(console.shows("A wallet already exists. No new wallet created."));
    assert!(console.shows("Exiting..."));
    assert!(!console.shows(wallet.private_key()));
}

/// Tests that unknown choices are rejected and the menu ends with input.
#[test]
fn test_menu_invalid_choice_and_end_of_input() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let store = KeyStore::new(dir.path().join("wallet.json"));
    let rpc = offline_client();

    let mut console = ScriptedConsole::new(&["9"]);
    rt.block_on(menu::run(&mut console, &store, &rpc)).unwrap();

    assert!(console.shows("Invalid choice, try again."));
    assert!(console.shows("Exiting..."));
}

/// Tests that operations needing a wallet say so when none exists.
#[test]
fn test_menu_requires_wallet() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let store = KeyStore::new(dir.path().join("wallet.json"));
    let rpc = offline_client();

    let mut console = ScriptedConsole::new(&["2", "3", "4", "5"]);
    rt.block_on(menu::run(&mut console, &store, &rpc)).unwrap();

    let missing = console
        .output
        .iter()
        .filter(|line| line.contains("No wallet found. Please create a wallet first."))
        .count();
    assert_eq!(missing, 3);
    assert!(!console.shows("Enter recipient address"));
}

/// Tests the balance and transfer flows through the menu.
#[test]
fn test_menu_balance_and_transfer() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let store = KeyStore::new(dir.path().join("wallet.json"));
    store.generate().unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/wallet")
            .json_body_partial(json!({"method": "getBalance"}).to_string());
        then.status(200).json_body(json!({"result": "0x5f5e100"}));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/wallet")
            .json_body_partial(json!({"method": "transfer"}).to_string());
        then.status(200).json_body(json!({"result": "0xabc123"}));
    });

    let rpc = RpcClient::new(&WalletConfig {
        rpc_url: server.base_url(),
        timeout_secs: 2,
    })
    .unwrap();

    let mut console = ScriptedConsole::new(&[
        "2",
        "3",
        "0x00000000000000000000000000000000000000aa",
        "2.5",
        "5",
    ]);
    rt.block_on(menu::run(&mut console, &store, &rpc)).unwrap();

    assert!(console.shows("100.0 S"));
    assert!(console.shows("Transaction successful! Tx Hash:"));
    assert!(console.shows("0xabc123"));
}

/// Tests that bad transfer input is reported and the menu carries on.
#[test]
fn test_menu_transfer_bad_input() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let store = KeyStore::new(dir.path().join("wallet.json"));
    store.generate().unwrap();
    let rpc = offline_client();

    let mut console = ScriptedConsole::new(&[
        "3",
        "0x1234",
        "1",
        "3",
        "0x00000000000000000000000000000000000000aa",
        "1.1234567",
        "5",
    ]);
    rt.block_on(menu::run(&mut console, &store, &rpc)).unwrap();

    assert!(console.shows("Invalid address"));
    assert!(console.shows("Amount cannot have more than 6 decimal places"));
    assert!(console.shows("Exiting..."));
}

/// Tests that an unreachable node is reported without ending the menu.
#[test]
fn test_menu_airdrop_unreachable_node() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let store = KeyStore::new(dir.path().join("wallet.json"));
    store.generate().unwrap();
    let rpc = offline_client();

    let mut console = ScriptedConsole::new(&["4", "5"]);
    rt.block_on(menu::run(&mut console, &store, &rpc)).unwrap();

    assert!(console.shows("Requesting airdrop for wallet"));
    assert!(console.shows("Failed to claim airdrop"));
    assert!(console.shows("Exiting..."));
}

/// Tests exporting the private key with and without a stored wallet.
#[test]
fn test_export_key() {
    let dir = tempdir().unwrap();
    let store = KeyStore::new(dir.path().join("wallet.json"));

    let mut console = ScriptedConsole::new(&[]);
    assert!(!menu::export_key(&mut console, &store));
    assert!(console.shows("No wallet found. Please create a wallet first."));

    let wallet = store.generate().unwrap();
    let mut console = ScriptedConsole::new(&[]);
    assert!(menu::export_key(&mut console, &store));
    assert!(console.shows("Private Key:"));
    assert!(console.shows(wallet.private_key()));
    assert!(console.shows("WARNING: Keep this key safe and private!"));
}
