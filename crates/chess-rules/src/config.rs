//! Rule configuration loaded from TOML.
//!
//! Every key is optional; a missing key keeps the standard value.
//!
//! ```toml
//! repetition_limit = 3
//! fifty_move_halfmoves = 100
//! allow_draw_agreement = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The file parsed but holds an unusable value.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Thresholds of the draw rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Occurrences of one position that end the game drawn.
    pub repetition_limit: usize,
    /// Half-moves without a pawn move or capture that end the game drawn.
    pub fifty_move_halfmoves: u32,
    /// Whether [`Game::agree_draw`](crate::Game::agree_draw) is honoured.
    pub allow_draw_agreement: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            repetition_limit: 3,
            fifty_move_halfmoves: 100,
            allow_draw_agreement: true,
        }
    }
}

impl RulesConfig {
    /// Parses and validates a configuration.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid TOML, or
    /// [`ConfigError::Invalid`] if a limit is zero.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Rejects limits that would end every game immediately.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repetition_limit == 0 {
            return Err(ConfigError::Invalid(
                "repetition_limit must be at least 1".to_string(),
            ));
        }
        if self.fifty_move_halfmoves == 0 {
            return Err(ConfigError::Invalid(
                "fifty_move_halfmoves must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_standard_rules() {
        let config = RulesConfig::default();
        assert_eq!(config.repetition_limit, 3);
        assert_eq!(config.fifty_move_halfmoves, 100);
        assert!(config.allow_draw_agreement);
    }

    #[test]
    fn test_parse_full_config() {
        let config = RulesConfig::from_toml_str(
            r#"
repetition_limit = 5
fifty_move_halfmoves = 150
allow_draw_agreement = false
"#,
        )
        .unwrap();
        assert_eq!(config.repetition_limit, 5);
        assert_eq!(config.fifty_move_halfmoves, 150);
        assert!(!config.allow_draw_agreement);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = RulesConfig::from_toml_str("repetition_limit = 2").unwrap();
        assert_eq!(config.repetition_limit, 2);
        assert_eq!(config.fifty_move_halfmoves, 100);
        assert_eq!(RulesConfig::from_toml_str("").unwrap(), RulesConfig::default());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = RulesConfig::from_toml_str("fifty_move_halfmoves = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_toml_rejected() {
        let err = RulesConfig::from_toml_str("repetition_limit = \"three\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "allow_draw_agreement = false").unwrap();
        let config = RulesConfig::load(file.path()).unwrap();
        assert!(!config.allow_draw_agreement);
        assert_eq!(config.repetition_limit, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RulesConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = RulesConfig {
            repetition_limit: 4,
            ..RulesConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(RulesConfig::from_toml_str(&text).unwrap(), config);
    }
}
