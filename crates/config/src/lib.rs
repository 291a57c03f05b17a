//! Configuration for the contract deploy tool.
//!
//! This crate provides:
//! - Secret loading from the git-ignored `local.jsonc` and `.private-keys`
//! - Named networks, static or backed by a lazy wallet-provider factory
//! - Solidity compiler selection

pub mod compiler;
pub mod error;
pub mod network;
pub mod project;
pub mod secrets;

pub use compiler::{Compilers, OptimizerSettings, SolcConfig, SolcSettings, SolcVersion};
pub use error::{ConfigError, ConfigLoadError, MissingCredentialsError, ProviderError};
pub use network::{
    build_network_map, NetworkDescriptor, NetworkId, NetworkMap, ProviderFactory,
    ResolvedProvider, RpcEndpoint, StaticNetwork,
};
pub use project::{MochaOptions, ProjectConfig, DEFAULT_NETWORK};
pub use secrets::{SecretBundle, LOCAL_CONFIG_FILE, PRIVATE_KEYS_FILE};
