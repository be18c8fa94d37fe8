//! Integration tests for the S Chain wallet.

pub mod menu_tests;
pub mod transfer_tests;
