//! Top-level configuration consumed by the deploy tool.

use crate::{
    compiler::Compilers,
    error::{ConfigError, ConfigLoadError},
    network::{build_network_map, NetworkDescriptor, NetworkMap},
    secrets::SecretBundle,
};
use serde::Serialize;
use std::{path::Path, sync::Arc};
use tracing::debug;

/// Network the deploy tool uses when none is named.
pub const DEFAULT_NETWORK: &str = "development";

/// Test-runner options, passed through untouched.
pub type MochaOptions = serde_json::Map<String, serde_json::Value>;

/// Networks, test-runner options and compilers of one project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectConfig {
    pub networks: NetworkMap,
    pub mocha: MochaOptions,
    pub compilers: Compilers,
}

impl ProjectConfig {
    /// Load the secret bundle from `root` and build the configuration.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let root = root.as_ref();
        debug!(root = %root.display(), "Loading project configuration");

        let secrets = SecretBundle::load(root)?;
        Ok(Self::from_secrets(Arc::new(secrets)))
    }

    /// Build the configuration around an already loaded bundle.
    pub fn from_secrets(secrets: Arc<SecretBundle>) -> Self {
        Self {
            networks: build_network_map(&secrets),
            mocha: MochaOptions::new(),
            compilers: Compilers::default(),
        }
    }

    /// Look up a network by name.
    pub fn network(&self, name: &str) -> Result<&NetworkDescriptor, ConfigError> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::{LOCAL_CONFIG_FILE, PRIVATE_KEYS_FILE};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_secrets() {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();

        assert_eq!(config.networks.len(), 7);
        assert!(config.mocha.is_empty());
        assert!(config.network(DEFAULT_NETWORK).unwrap().is_static());
        assert!(config.network("devnet").unwrap().is_static());
    }

    #[test]
    fn test_unknown_network() {
        let config = ProjectConfig::from_secrets(Arc::default());
        let err = config.network("kovan").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNetwork(ref name) if name == "kovan"));
    }

    #[test]
    fn test_load_error_aborts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(LOCAL_CONFIG_FILE), "not json at all {").unwrap();
        fs::write(dir.path().join(PRIVATE_KEYS_FILE), "0x01\n").unwrap();

        assert!(ProjectConfig::load(dir.path()).is_err());
    }

    #[test]
    fn test_serialized_members() {
        let config = ProjectConfig::from_secrets(Arc::default());
        let value = serde_json::to_value(&config).unwrap();

        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["compilers", "mocha", "networks"]);
        assert_eq!(value["compilers"]["solc"]["version"], "0.4.25");
    }
}
