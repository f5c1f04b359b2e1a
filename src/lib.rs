// src/lib.rs
//! Shamir backup and recovery of BIP-39 wallet phrases.
//!
//! - [`shamir`]: threshold secret sharing over GF(2^8)
//! - [`core::mnemonic`]: BIP-39 phrase codec
//! - [`core::key_manager`]: BIP-32/44 derivation to an Ethereum key and address
//! - [`core::wallet`]: the split and recover pipelines built from the above

pub mod cli;
pub mod core;
pub mod crypto;
pub mod security;
pub mod shamir;

pub use crate::core::errors::WalletError;
