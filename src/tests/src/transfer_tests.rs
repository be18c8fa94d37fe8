//! Tests for the wallet commands against a mock node.

use cli::commands::transfer::{Transfer, TransferStage};
use cli::commands::{airdrop, balance, transfer};
use cli::{RpcClient, WalletConfig, WalletError};
use httpmock::prelude::*;
use schain_core::signer::{sign, verify};
use schain_core::{CoreError, KeyStore, TransferRequest, Wallet};
use serde_json::json;
use tempfile::{tempdir, TempDir};
use tokio::runtime::Runtime;

const RECEIVER: &str = "0x00000000000000000000000000000000000000aa";

fn setup_wallet() -> (TempDir, KeyStore, Wallet) {
    let dir = tempdir().unwrap();
    let store = KeyStore::new(dir.path().join("wallet.json"));
    let wallet = store.generate().unwrap();
    (dir, store, wallet)
}

fn client_for(server: &MockServer) -> RpcClient {
    let config = WalletConfig {
        rpc_url: server.base_url(),
        timeout_secs: 2,
    };
    RpcClient::new(&config).unwrap()
}

/// Tests the balance query and its conversion for display.
#[test]
fn test_balance_end_to_end() {
    let rt = Runtime::new().unwrap();
    let (_dir, store, wallet) = setup_wallet();

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/wallet").json_body(json!({
            "method": "getBalance",
            "params": [wallet.address(), "latest"],
            "id": 666
        }));
        then.status(200).json_body(json!({"result": "0x5f5e100"}));
    });

    let balance = rt
        .block_on(balance::run(&client_for(&server), &store))
        .unwrap();

    mock.assert();
    assert_eq!(balance.units, 100_000_000);
    assert_eq!(balance.to_string(), "100.0");
    assert_eq!(balance.address, wallet.address());
}

/// Tests that a balance query without a wallet never reaches the node.
#[test]
fn test_balance_without_wallet() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let store = KeyStore::new(dir.path().join("wallet.json"));

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/wallet");
        then.status(200).json_body(json!({"result": "0x0"}));
    });

    let result = rt.block_on(balance::run(&client_for(&server), &store));

    assert!(matches!(result, Err(WalletError::WalletNotFound)));
    mock.assert_hits(0);
}

/// Tests a full transfer: conversion, signing and the submitted request.
#[test]
fn test_transfer_end_to_end() {
    let rt = Runtime::new().unwrap();
    let (_dir, store, wallet) = setup_wallet();

    let expected_tx = TransferRequest::new(
        wallet.address(),
        RECEIVER,
        schain_core::BaseUnits::new(2_500_000),
    );
    let expected_signature = sign(&expected_tx, wallet.private_key()).unwrap();

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/wallet").json_body(json!({
            "method": "transfer",
            "params": {
                "tx_data": {
                    "sender": wallet.address(),
                    "receiver": RECEIVER,
                    "amount": "2500000"
                },
                "signature": expected_signature
            },
            "id": 777
        }));
        then.status(200).json_body(json!({"result": "0xfeedbeef"}));
    });

    let rpc = client_for(&server);
    let mut transfer = Transfer::new(&rpc, &store);
    let receipt = rt.block_on(transfer.execute(RECEIVER, "2.5")).unwrap();

    mock.assert();
    assert_eq!(transfer.stage(), TransferStage::Succeeded);
    assert_eq!(receipt.tx_hash, "0xfeedbeef");
    assert_eq!(receipt.payload.tx_data, expected_tx);
    assert!(verify(&expected_tx, &receipt.payload.signature, wallet.address()).is_ok());
}

/// Tests that a node-side rejection is surfaced without a retry.
#[test]
fn test_transfer_rejected_by_node() {
    let rt = Runtime::new().unwrap();
    let (_dir, store, wallet) = setup_wallet();

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/wallet");
        then.status(200).json_body(json!({"error": "Insufficient balance"}));
    });

    let rpc = client_for(&server);
    let mut transfer = Transfer::new(&rpc, &store);
    let result = rt.block_on(transfer.execute(RECEIVER, "1"));

    match result {
        Err(WalletError::Application(message)) => assert_eq!(message, "Insufficient balance"),
        other => panic!("unexpected result: {:?}", other),
    }
    mock.assert_hits(1);
    assert_eq!(transfer.stage(), TransferStage::Failed);
    assert_eq!(store.load().unwrap().unwrap(), wallet);
}

/// Tests that an HTTP failure is a transport error carrying the body.
#[test]
fn test_transfer_http_error() {
    let rt = Runtime::new().unwrap();
    let (_dir, store, _wallet) = setup_wallet();

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/wallet");
        then.status(500).body("upstream unavailable");
    });

    let result = rt.block_on(transfer::run(&client_for(&server), &store, RECEIVER, "1"));

    match result {
        Err(WalletError::Transport { status, message }) => {
            assert_eq!(status, Some(500));
            assert!(message.contains("upstream unavailable"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    mock.assert_hits(1);
}

/// Tests that invalid input is rejected before anything is sent.
#[test]
fn test_transfer_invalid_input_sends_nothing() {
    let rt = Runtime::new().unwrap();
    let (_dir, store, _wallet) = setup_wallet();

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/wallet");
        then.status(200).json_body(json!({"result": "0x01"}));
    });
    let rpc = client_for(&server);

    let bad_address = rt.block_on(transfer::run(&rpc, &store, "not-an-address", "1"));
    assert!(matches!(
        bad_address,
        Err(WalletError::Core(CoreError::InvalidAddress(_)))
    ));

    let zero = rt.block_on(transfer::run(&rpc, &store, RECEIVER, "0"));
    assert!(matches!(zero, Err(WalletError::Core(CoreError::InvalidAmount(_)))));

    let too_precise = rt.block_on(transfer::run(&rpc, &store, RECEIVER, "1.1234567"));
    assert!(matches!(
        too_precise,
        Err(WalletError::Core(CoreError::PrecisionExceeded { .. }))
    ));

    mock.assert_hits(0);
}

/// Tests the airdrop request and both kinds of answer.
#[test]
fn test_airdrop() {
    let rt = Runtime::new().unwrap();
    let (_dir, store, wallet) = setup_wallet();

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/wallet").json_body(json!({
            "method": "requestAirdrop",
            "params": [wallet.address()],
            "id": 888
        }));
        then.status(200).json_body(json!({"result": {"amount": "10", "tx": "0x01"}}));
    });

    let result = rt.block_on(airdrop::run(&client_for(&server), &store)).unwrap();
    mock.assert();
    assert_eq!(result["tx"], "0x01");

    let refusing = MockServer::start();
    refusing.mock(|when, then| {
        when.method(POST).path("/wallet");
        then.status(200).json_body(json!({"error": "Airdrop already claimed"}));
    });

    let result = rt.block_on(airdrop::run(&client_for(&refusing), &store));
    assert!(matches!(result, Err(WalletError::Application(_))));
}
