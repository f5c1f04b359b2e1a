// src/security/mod.rs
//! Secret hygiene for the wallet core.
//!
//! Zeroizing buffer aliases and redaction helpers used wherever secret
//! material could otherwise end up in logs.

pub mod redaction;
pub mod secret;

// Secret buffer alias re-export
pub use secret::{SecretString, SecretVec};

pub use redaction::{redact_bytes, redact_phrase};
