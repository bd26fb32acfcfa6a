//! Host settings that shape key decoding and notices.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Default terminal poll interval in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Settings for the key-input host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether notices such as "key not defined" are shown on the message line.
    pub message_line: bool,
    /// Whether the terminal delivers wide characters.
    ///
    /// When false the terminal is treated as single-byte and no codepoint
    /// at or above 0x100 counts as printable.
    pub wide_chars: bool,
    /// How often the terminal driver polls for input, in milliseconds.
    pub tick_rate_ms: u64,
}

impl Settings {
    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if the tick rate is zero.
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            message_line: true,
            wide_chars: true,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.message_line);
        assert!(settings.wide_chars);
        assert_eq!(settings.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let settings = Settings {
            tick_rate_ms: 0,
            ..Settings::default()
        };
        let result = settings.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("tick_rate_ms"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str("wide_chars = false").unwrap();
        assert!(!settings.wide_chars);
        assert!(settings.message_line);
        assert_eq!(settings.tick_rate_ms, DEFAULT_TICK_RATE_MS);
    }
}
