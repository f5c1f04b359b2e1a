pub mod address;
pub mod bip44;
pub mod config;
pub mod errors;
pub mod key_manager;
pub mod mnemonic;
pub mod wallet;

pub use errors::WalletError;
pub use key_manager::DerivedAccount;
