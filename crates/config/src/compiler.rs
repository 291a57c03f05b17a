//! Solidity compiler selection.
//!
//! Values are handed to the compiler verbatim; nothing here checks that the
//! version exists or that the EVM target is known.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Which solc build to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolcVersion {
    /// Exact release fetched from solc-bin, e.g. `0.4.25`.
    Exact(String),
    /// Whatever solc is installed on the host.
    Native,
}

impl fmt::Display for SolcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(version) => f.write_str(version),
            Self::Native => f.write_str("native"),
        }
    }
}

impl Serialize for SolcVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SolcVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw == "native" {
            Self::Native
        } else {
            Self::Exact(raw)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    pub enabled: bool,
    pub runs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolcSettings {
    pub optimizer: OptimizerSettings,
    pub evm_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolcConfig {
    pub version: SolcVersion,
    pub settings: SolcSettings,
}

impl SolcConfig {
    /// solc 0.4.25 targeting byzantium, optimizer off.
    pub fn pinned() -> Self {
        Self {
            version: SolcVersion::Exact("0.4.25".to_owned()),
            settings: SolcSettings {
                optimizer: OptimizerSettings {
                    enabled: false,
                    runs: 200,
                },
                evm_version: "byzantium".to_owned(),
            },
        }
    }

    /// Host solc with the optimizer on.
    pub fn native() -> Self {
        Self {
            version: SolcVersion::Native,
            settings: SolcSettings {
                optimizer: OptimizerSettings {
                    enabled: true,
                    runs: 200,
                },
                evm_version: "byzantium".to_owned(),
            },
        }
    }
}

/// Compilers known to the deploy tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compilers {
    pub solc: SolcConfig,
}

impl Default for Compilers {
    fn default() -> Self {
        Self {
            solc: SolcConfig::pinned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_selection() {
        let compilers = Compilers::default();
        assert_eq!(compilers.solc.version, SolcVersion::Exact("0.4.25".into()));
        assert!(!compilers.solc.settings.optimizer.enabled);
        assert_eq!(compilers.solc.settings.optimizer.runs, 200);
        assert_eq!(compilers.solc.settings.evm_version, "byzantium");
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(Compilers::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "solc": {
                    "version": "0.4.25",
                    "settings": {
                        "optimizer": { "enabled": false, "runs": 200 },
                        "evmVersion": "byzantium"
                    }
                }
            })
        );
    }

    #[test]
    fn test_native_sentinel() {
        let value = serde_json::to_value(SolcConfig::native()).unwrap();
        assert_eq!(value["version"], "native");

        let parsed: SolcVersion = serde_json::from_value(json!("native")).unwrap();
        assert_eq!(parsed, SolcVersion::Native);
    }
}
