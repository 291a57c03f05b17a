//! Locally stored, git-ignored credentials.
//!
//! Two optional files in the project root feed the [`SecretBundle`]:
//! - `local.jsonc`: comment-tolerant JSON with `infura_project_id` and
//!   `infura_project_secret`
//! - `.private-keys`: one private key per line
//!
//! A missing file leaves the corresponding fields absent. Any other failure
//! aborts loading.

use crate::error::ConfigLoadError;
use serde::Deserialize;
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

/// File holding the Infura credentials.
pub const LOCAL_CONFIG_FILE: &str = "local.jsonc";

/// File holding the signing keys.
pub const PRIVATE_KEYS_FILE: &str = ".private-keys";

/// Credentials loaded once at startup and shared read-only afterwards.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretBundle {
    infura_project_id: Option<String>,
    infura_project_secret: Option<String>,
    private_keys: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct LocalConfig {
    #[serde(default)]
    infura_project_id: Option<String>,
    #[serde(default)]
    infura_project_secret: Option<String>,
}

impl SecretBundle {
    /// Load both secret sources from `root`.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let root = root.as_ref();

        let local = match read_optional(&root.join(LOCAL_CONFIG_FILE))? {
            Some((path, contents)) => json5::from_str::<LocalConfig>(&contents)
                .map_err(|source| ConfigLoadError::Parse { path, source })?,
            None => LocalConfig::default(),
        };

        let private_keys = read_optional(&root.join(PRIVATE_KEYS_FILE))?
            .map(|(_, contents)| parse_private_keys(&contents));

        let bundle = Self {
            infura_project_id: non_empty(local.infura_project_id),
            infura_project_secret: non_empty(local.infura_project_secret),
            private_keys,
        };

        debug!(
            infura_project_id = bundle.infura_project_id.is_some(),
            infura_project_secret = bundle.infura_project_secret.is_some(),
            private_keys = bundle.private_keys.as_ref().map(Vec::len),
            "Loaded secret bundle"
        );

        Ok(bundle)
    }

    /// Override the Infura project id.
    pub fn with_infura_project_id(mut self, id: impl Into<String>) -> Self {
        self.infura_project_id = Some(id.into());
        self
    }

    /// Override the Infura project secret.
    pub fn with_infura_project_secret(mut self, secret: impl Into<String>) -> Self {
        self.infura_project_secret = Some(secret.into());
        self
    }

    /// Override the signing keys.
    pub fn with_private_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.private_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn infura_project_id(&self) -> Option<&str> {
        self.infura_project_id.as_deref()
    }

    pub fn infura_project_secret(&self) -> Option<&str> {
        self.infura_project_secret.as_deref()
    }

    /// Signing keys in file order, or `None` when `.private-keys` does not exist.
    pub fn private_keys(&self) -> Option<&[String]> {
        self.private_keys.as_deref()
    }
}

// Secrets stay out of logs and panic messages.
impl fmt::Debug for SecretBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBundle")
            .field("infura_project_id", &self.infura_project_id.is_some())
            .field("infura_project_secret", &self.infura_project_secret.is_some())
            .field("private_keys", &self.private_keys.as_ref().map(Vec::len))
            .finish()
    }
}

/// Read a whole file as UTF-8. `Ok(None)` when it does not exist.
fn read_optional(path: &Path) -> Result<Option<(PathBuf, String)>, ConfigLoadError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Secret file not found");
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigLoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let contents = String::from_utf8(bytes).map_err(|source| ConfigLoadError::Encoding {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Some((path.to_path_buf(), contents)))
}

fn parse_private_keys(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
