//! Error taxonomy for configuration loading and provider construction.

use client::ClientError;
use std::path::PathBuf;
use thiserror::Error;

/// A local secret source exists but could not be read or parsed.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },
}

impl ConfigLoadError {
    /// The secret source that caused the failure.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Encoding { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// A deferred network provider was invoked without a secret it needs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingCredentialsError {
    #[error("Create a .private-keys file")]
    PrivateKeys,

    #[error("Add at least one private key to .private-keys")]
    EmptyPrivateKeys,

    #[error("Set \"infura_project_id\" in local.jsonc")]
    InfuraProjectId,

    #[error("Set \"infura_project_secret\" in local.jsonc")]
    InfuraProjectSecret,
}

impl MissingCredentialsError {
    /// Name of the missing secret.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::PrivateKeys | Self::EmptyPrivateKeys => "private_keys",
            Self::InfuraProjectId => "infura_project_id",
            Self::InfuraProjectSecret => "infura_project_secret",
        }
    }
}

/// Failure while invoking a deferred provider factory.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error(transparent)]
    MissingCredentials(#[from] MissingCredentialsError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Errors surfaced by the project configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] ConfigLoadError),

    #[error("Unknown network `{0}`")]
    UnknownNetwork(String),
}
