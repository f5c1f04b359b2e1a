use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::errors::WalletError;
use crate::core::mnemonic::{MnemonicStrength, VALID_WORD_COUNTS};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "SHAMIR_WALLET_CONFIG";
pub const SHARES_ENV: &str = "SHAMIR_WALLET_SHARES";
pub const THRESHOLD_ENV: &str = "SHAMIR_WALLET_THRESHOLD";

/// Split parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Number of shares produced by a split
    #[serde(default = "SharingConfig::default_total_shares")]
    pub total_shares: u8,

    /// Shares needed to reconstruct
    #[serde(default = "SharingConfig::default_threshold")]
    pub threshold: u8,
}

impl SharingConfig {
    fn default_total_shares() -> u8 { 6 }
    fn default_threshold() -> u8 { 3 }
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            total_shares: Self::default_total_shares(),
            threshold: Self::default_threshold(),
        }
    }
}

/// Mnemonic generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MnemonicConfig {
    #[serde(default = "MnemonicConfig::default_word_count")]
    pub word_count: usize,
}

impl MnemonicConfig {
    fn default_word_count() -> usize { 12 }

    pub fn strength(&self) -> Result<MnemonicStrength, WalletError> {
        MnemonicStrength::from_word_count(self.word_count).map_err(|_| {
            WalletError::ConfigError(format!(
                "mnemonic.word_count must be one of {:?}, got {}",
                VALID_WORD_COUNTS, self.word_count
            ))
        })
    }
}

impl Default for MnemonicConfig {
    fn default() -> Self {
        Self { word_count: Self::default_word_count() }
    }
}

/// Logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "LoggingConfig::default_filter")]
    pub filter: String,
}

impl LoggingConfig {
    fn default_filter() -> String { "warn".to_string() }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: Self::default_filter() }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sharing: SharingConfig,
    #[serde(default)]
    pub mnemonic: MnemonicConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, WalletError> {
        toml::from_str(content)
            .map_err(|e| WalletError::ConfigError(format!("failed to parse config: {}", e)))
    }

    pub fn from_file(path: &Path) -> Result<Self, WalletError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WalletError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve the configuration: explicit path, then `SHAMIR_WALLET_CONFIG`,
    /// then defaults. Environment overrides are applied and the result is
    /// validated.
    pub fn load(path: Option<&Path>) -> Result<Self, WalletError> {
        let env_path = std::env::var_os(CONFIG_PATH_ENV);
        let mut config = match path.or(env_path.as_deref().map(Path::new)) {
            Some(p) => {
                debug!(path = %p.display(), "loading config file");
                Self::from_file(p)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SHAMIR_WALLET_SHARES` / `SHAMIR_WALLET_THRESHOLD`.
    pub fn apply_env_overrides(&mut self) -> Result<(), WalletError> {
        if let Some(n) = env_u8(SHARES_ENV)? {
            self.sharing.total_shares = n;
        }
        if let Some(k) = env_u8(THRESHOLD_ENV)? {
            self.sharing.threshold = k;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), WalletError> {
        let SharingConfig { total_shares, threshold } = self.sharing;
        if total_shares == 0 {
            return Err(WalletError::ConfigError("sharing.total_shares cannot be zero".into()));
        }
        if threshold == 0 {
            return Err(WalletError::ConfigError("sharing.threshold cannot be zero".into()));
        }
        if threshold > total_shares {
            return Err(WalletError::ConfigError(format!(
                "sharing.threshold {} exceeds sharing.total_shares {}",
                threshold, total_shares
            )));
        }
        self.mnemonic.strength()?;
        Ok(())
    }
}

fn env_u8(name: &str) -> Result<Option<u8>, WalletError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u8>()
            .map(Some)
            .map_err(|_| WalletError::ConfigError(format!("{} must be 0..=255, got {:?}", name, raw))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(WalletError::ConfigError(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.sharing.total_shares, 6);
        assert_eq!(config.sharing.threshold, 3);
        assert_eq!(config.mnemonic.word_count, 12);
        assert_eq!(config.logging.filter, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config = AppConfig::from_toml_str("[sharing]\nthreshold = 2\n").unwrap();
        assert_eq!(config.sharing.threshold, 2);
        assert_eq!(config.sharing.total_shares, 6);
        assert_eq!(config.mnemonic, MnemonicConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        for toml in [
            "[sharing]\ntotal_shares = 0",
            "[sharing]\nthreshold = 0",
            "[sharing]\ntotal_shares = 2\nthreshold = 3",
            "[mnemonic]\nword_count = 13",
        ] {
            let config = AppConfig::from_toml_str(toml).unwrap();
            assert!(matches!(config.validate(), Err(WalletError::ConfigError(_))), "{toml}");
        }
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            AppConfig::from_toml_str("[sharing\n"),
            Err(WalletError::ConfigError(_))
        ));
        assert!(AppConfig::from_toml_str("[sharing]\ntotal_shares = 300").is_err());
    }
}
