//! Backup and recovery pipeline.
//!
//! `create`: phrase -> validate -> split into shares.
//! `recover`: hex shares -> parse -> combine -> validate -> derive account.

pub mod create;
pub mod recover;

pub use create::{generate_mnemonic, split_mnemonic, MnemonicBackup};
pub use recover::{parse_shares, recover_mnemonic, recover_wallet, RecoveredWallet};
