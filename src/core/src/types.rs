//! Core types for the S Chain wallet.

use crate::amount::BaseUnits;
use crate::errors::CoreError;
use ethers::signers::LocalWallet;
use ethers::types::Address;
use ethers::utils::to_checksum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of hex digits in an account address.
const ADDRESS_HEX_LEN: usize = 40;

/// A locally stored keypair.
///
/// The address is kept in EIP-55 checksummed form next to the hex encoded
/// secp256k1 private key, which is the on-disk layout of the wallet file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// The checksummed account address
    address: String,
    /// The hex encoded private key
    private_key: String,
}

impl Wallet {
    /// Creates a wallet with a fresh random keypair.
    pub fn random() -> Self {
        let signer = LocalWallet::new(&mut rand::thread_rng());
        Self::from_signer(&signer)
    }

    /// Creates a wallet from an existing signer.
    pub fn from_signer(signer: &LocalWallet) -> Self {
        use ethers::signers::Signer;

        Self {
            address: to_checksum(&signer.address(), None),
            private_key: hex::encode(signer.signer().to_bytes()),
        }
    }

    /// Gets the checksummed address of the wallet.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Gets the hex encoded private key.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Builds the signer for this wallet's private key.
    pub fn signer(&self) -> Result<LocalWallet, CoreError> {
        parse_private_key(&self.private_key)
    }

    /// Checks that the stored address is the one derived from the private key.
    pub fn check_consistency(&self) -> Result<(), String> {
        use ethers::signers::Signer;

        let signer = parse_private_key(&self.private_key).map_err(|e| e.to_string())?;
        let stored = parse_address(&self.address).map_err(|e| e.to_string())?;

        if stored != signer.address() {
            return Err(format!(
                "address {} does not belong to the stored private key",
                self.address
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Parses a hex encoded private key, with or without a `0x` prefix.
pub fn parse_private_key(input: &str) -> Result<LocalWallet, CoreError> {
    let body = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);

    body.parse::<LocalWallet>()
        .map_err(|e| CoreError::Signing(format!("Invalid private key: {}", e)))
}

/// Parses an account address.
///
/// Accepts 40 hex digits with an optional `0x` prefix. All-lowercase and
/// all-uppercase forms are taken as is; a mixed-case address must carry a
/// valid EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address, CoreError> {
    let body = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);

    if body.len() != ADDRESS_HEX_LEN || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::InvalidAddress(format!(
            "'{}' is not {} hex digits",
            input, ADDRESS_HEX_LEN
        )));
    }

    let bytes = hex::decode(body).map_err(|e| CoreError::InvalidAddress(e.to_string()))?;
    let address = Address::from_slice(&bytes);

    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        let checksummed = to_checksum(&address, None);
        if checksummed[2..] != *body {
            return Err(CoreError::InvalidAddress(format!(
                "checksum mismatch for '{}'",
                input
            )));
        }
    }

    Ok(address)
}

/// A value transfer between two accounts.
///
/// Field order is part of the signed message layout and must not change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransferRequest {
    /// The sender's address
    pub sender: String,
    /// The recipient's address
    pub receiver: String,
    /// The amount in base units
    pub amount: BaseUnits,
}

impl TransferRequest {
    /// Creates a new transfer request.
    pub fn new(sender: &str, receiver: &str, amount: BaseUnits) -> Self {
        Self {
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            amount,
        }
    }
}

/// A transfer together with the sender's signature over it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignedPayload {
    /// The signed transfer
    pub tx_data: TransferRequest,
    /// The 0x-prefixed hex signature
    pub signature: String,
}
