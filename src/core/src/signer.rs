//! Signing of transfer requests.
//!
//! A transfer is signed as a personal message (EIP-191): the canonical JSON
//! text of the request is prefixed with `"\x19Ethereum Signed Message:\n"` and
//! its length, keccak-256 hashed, and signed with a recoverable secp256k1
//! signature. The node re-serializes the request the same way and recovers
//! the sender from the signature, so the JSON layout below is part of the
//! protocol.

use crate::errors::CoreError;
use crate::types::{parse_address, parse_private_key, SignedPayload, TransferRequest, Wallet};
use ethers::signers::LocalWallet;
use ethers::types::Signature;
use ethers::utils::hash_message;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;
use std::str::FromStr;
use tracing::debug;

/// JSON formatter writing `", "` between members and `": "` after keys.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serializes a value into the canonical text that gets signed.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, CoreError> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(|e| CoreError::Signing(e.to_string()))
}

/// Signs a transfer request with a hex encoded private key.
///
/// Returns the 65-byte `r || s || v` signature as 0x-prefixed hex. Nonces are
/// derived per RFC 6979, so the same inputs always give the same signature.
pub fn sign(tx_data: &TransferRequest, private_key: &str) -> Result<String, CoreError> {
    sign_with(tx_data, &parse_private_key(private_key)?)
}

/// Signs a transfer request with an already parsed signer.
pub fn sign_with(tx_data: &TransferRequest, signer: &LocalWallet) -> Result<String, CoreError> {
    let message = canonical_json(tx_data)?;
    debug!("Signing message: {}", message);

    let signature = signer
        .sign_hash(hash_message(message.as_bytes()))
        .map_err(|e| CoreError::Signing(e.to_string()))?;

    Ok(format!("0x{}", hex::encode(signature.to_vec())))
}

/// Signs a transfer request with a stored wallet.
pub fn sign_transfer(tx_data: TransferRequest, wallet: &Wallet) -> Result<SignedPayload, CoreError> {
    let signature = sign_with(&tx_data, &wallet.signer()?)?;
    Ok(SignedPayload { tx_data, signature })
}

/// Checks that `signature` over `tx_data` was produced by `address`.
pub fn verify(tx_data: &TransferRequest, signature: &str, address: &str) -> Result<(), CoreError> {
    let expected = parse_address(address)?;
    let signature = Signature::from_str(signature)
        .map_err(|e| CoreError::Signing(format!("Malformed signature: {}", e)))?;
    let message = canonical_json(tx_data)?;

    signature
        .verify(message, expected)
        .map_err(|e| CoreError::Signing(e.to_string()))
}
