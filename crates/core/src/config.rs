//! Configuration management for msgsign.
//!
//! The configuration is assembled once at start-up from environment
//! variables, falling back to static defaults, and then passed explicitly
//! to every key operation.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Overrides the directory holding the keypair.
pub const ENV_KEYPATH: &str = "KEYPATH";
/// Overrides the public key filename inside the key directory.
pub const ENV_PUBKEY_FILENAME: &str = "PUBKEY_FILENAME";
/// Overrides the private key filename inside the key directory.
pub const ENV_PRIVKEY_FILENAME: &str = "PRIVKEY_FILENAME";
/// Selects `text` or `json` log output.
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Key directory created under the home directory when `KEYPATH` is unset.
pub const DEFAULT_KEY_DIR_NAME: &str = ".ssh";
/// Default filename for the private RSA key.
pub const DEFAULT_PRIVATE_KEY_FILENAME: &str = "id_rsa";
/// Default filename for the public RSA key.
pub const DEFAULT_PUBLIC_KEY_FILENAME: &str = "id_rsa.pub";

/// Output format of the diagnostic log written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line events
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    fn parse(value: &OsStr) -> Result<Self> {
        let value = value.to_str().ok_or_else(|| Error::Config {
            key: ENV_LOG_FORMAT,
            reason: "not valid UTF-8".to_string(),
        })?;

        match value.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::Config {
                key: ENV_LOG_FORMAT,
                reason: format!("unknown log format '{}' (expected 'text' or 'json')", other),
            }),
        }
    }
}

/// Explicit configuration for a single signing invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerConfig {
    /// Directory holding both key files
    pub key_dir: PathBuf,
    /// Filename of the PEM-encoded public key
    pub public_key_filename: OsString,
    /// Filename of the PEM-encoded private key
    pub private_key_filename: OsString,
    /// Diagnostic log format
    pub log_format: LogFormat,
}

impl SignerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset and empty variables both fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let key_dir = match get(ENV_KEYPATH) {
            Some(dir) => PathBuf::from(dir),
            None => default_key_dir(get("HOME")),
        };

        let log_format = match get(ENV_LOG_FORMAT) {
            Some(value) => LogFormat::parse(&value)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            key_dir,
            public_key_filename: get(ENV_PUBKEY_FILENAME)
                .unwrap_or_else(|| DEFAULT_PUBLIC_KEY_FILENAME.into()),
            private_key_filename: get(ENV_PRIVKEY_FILENAME)
                .unwrap_or_else(|| DEFAULT_PRIVATE_KEY_FILENAME.into()),
            log_format,
        })
    }

    /// Configuration rooted at an explicit key directory with default filenames.
    pub fn with_key_dir<P: AsRef<Path>>(key_dir: P) -> Self {
        Self {
            key_dir: key_dir.as_ref().to_path_buf(),
            public_key_filename: DEFAULT_PUBLIC_KEY_FILENAME.into(),
            private_key_filename: DEFAULT_PRIVATE_KEY_FILENAME.into(),
            log_format: LogFormat::default(),
        }
    }

    /// Full path of the private key file.
    pub fn private_key_path(&self) -> PathBuf {
        self.key_dir.join(&self.private_key_filename)
    }

    /// Full path of the public key file.
    pub fn public_key_path(&self) -> PathBuf {
        self.key_dir.join(&self.public_key_filename)
    }
}

fn default_key_dir(home: Option<OsString>) -> PathBuf {
    // No home directory means the filesystem root, e.g. inside a bare container.
    let home = home.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("/"));
    home.join(DEFAULT_KEY_DIR_NAME)
}
