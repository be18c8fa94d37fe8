//! Transfer command for the CLI wallet.

use super::require_wallet;
use crate::errors::WalletError;
use crate::rpc::{render, RpcClient, TRANSFER_ID};
use schain_core::signer::sign_transfer;
use schain_core::{
    parse_address, to_base_units, CoreError, KeyStore, SignedPayload, TransferRequest,
};
use tracing::{debug, info};

/// Progress of a transfer through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStage {
    /// Nothing has happened yet
    Idle,
    /// Checking the wallet, recipient and amount
    ValidatingInput,
    /// Signing the transfer request
    Signing,
    /// Waiting for the node
    Submitting,
    /// The node accepted the transfer
    Succeeded,
    /// The transfer was abandoned
    Failed,
}

/// What the node returned for an accepted transfer.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    /// The request that was submitted
    pub payload: SignedPayload,
    /// Transaction identifier reported by the node
    pub tx_hash: String,
}

/// A single transfer attempt.
pub struct Transfer<'a> {
    rpc: &'a RpcClient,
    store: &'a KeyStore,
    stage: TransferStage,
}

impl<'a> Transfer<'a> {
    /// Creates an idle transfer.
    pub fn new(rpc: &'a RpcClient, store: &'a KeyStore) -> Self {
        Self {
            rpc,
            store,
            stage: TransferStage::Idle,
        }
    }

    /// Gets the current stage.
    pub fn stage(&self) -> TransferStage {
        self.stage
    }

    /// Validates, signs and submits a transfer of `amount` tokens to `to`.
    ///
    /// Invalid input is rejected before anything is signed or sent. There is
    /// no retry: a rejected or failed submission ends in `Failed`.
    pub async fn execute(&mut self, to: &str, amount: &str) -> Result<TransferReceipt, WalletError> {
        let result = self.drive(to, amount).await;
        if result.is_ok() {
            self.advance(TransferStage::Succeeded);
        } else {
            self.advance(TransferStage::Failed);
        }
        result
    }

    async fn drive(&mut self, to: &str, amount: &str) -> Result<TransferReceipt, WalletError> {
        self.advance(TransferStage::ValidatingInput);
        let wallet = require_wallet(self.store)?;
        let tx_data = prepare(wallet.address(), to, amount)?;

        self.advance(TransferStage::Signing);
        let payload = sign_transfer(tx_data, &wallet)?;

        self.advance(TransferStage::Submitting);
        info!(
            "Sending {} base units from {} to {}",
            payload.tx_data.amount, payload.tx_data.sender, payload.tx_data.receiver
        );
        let params = serde_json::to_value(&payload).map_err(CoreError::from)?;
        let result = self.rpc.call("transfer", params, TRANSFER_ID).await?;

        Ok(TransferReceipt {
            payload,
            tx_hash: render(&result),
        })
    }

    fn advance(&mut self, next: TransferStage) {
        debug!("Transfer stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }
}

/// Checks the recipient and amount and builds the transfer request.
pub fn prepare(sender: &str, to: &str, amount: &str) -> Result<TransferRequest, WalletError> {
    let receiver = to.trim();
    parse_address(receiver)?;
    let amount = to_base_units(amount)?;

    Ok(TransferRequest::new(sender, receiver, amount))
}

/// Runs the transfer command.
pub async fn run(
    rpc: &RpcClient,
    store: &KeyStore,
    to: &str,
    amount: &str,
) -> Result<TransferReceipt, WalletError> {
    Transfer::new(rpc, store).execute(to, amount).await
}
