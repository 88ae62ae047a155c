//! Runtime configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::kdf::KdfParams;

/// Settings shared by every operation of a [`Protector`](crate::Protector).
///
/// Missing fields fall back to their defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Argon2id cost parameters used to derive keys from passwords.
    pub kdf: KdfParams,
}

impl Config {
    pub fn new(kdf: KdfParams) -> Self {
        Self { kdf }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::InvalidInput(format!("Invalid configuration: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::InvalidInput(format!("Invalid configuration: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
        assert_eq!(Config::default().kdf, KdfParams::interactive());
    }

    #[test]
    fn kdf_params_are_read() {
        let config = Config::from_json(
            r#"{ "kdf": { "memory_cost": 1024, "time_cost": 2, "parallelism": 1 } }"#,
        )
        .unwrap();
        assert_eq!(
            config.kdf,
            KdfParams {
                memory_cost: 1024,
                time_cost: 2,
                parallelism: 1
            }
        );
    }

    #[test]
    fn json_roundtrip() {
        let config = Config::new(KdfParams::moderate());
        let json = config.to_json().unwrap();
        assert_eq!(Config::from_json(&json).unwrap(), config);
    }

    #[test]
    fn invalid_json_is_invalid_input() {
        assert!(matches!(
            Config::from_json("{ kdf: "),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "kdf": { "memory_cost": "lots" } }"#),
            Err(Error::InvalidInput(_))
        ));
    }
}
