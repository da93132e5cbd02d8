//! Top-level failure taxonomy of a signing invocation.
//!
//! Every variant is fatal: the invocation stops at the first error and the
//! process exits non-zero after printing the message.

use msgsign_crypto::{KeyError, SigningError};
use msgsign_keystore::KeystoreError;
use thiserror::Error;

/// Exit status for argument errors.
pub const EXIT_USAGE: u8 = 2;
/// Exit status for every other failure.
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Error)]
pub enum CliError {
    /// Wrong argument count, non-UTF-8 or oversized input
    #[error("{0}")]
    Usage(String),

    /// Invalid override variable
    #[error(transparent)]
    Config(msgsign_core::Error),

    /// The diagnostic log subscriber could not be installed
    #[error(transparent)]
    Logging(msgsign_core::Error),

    /// Directory or key file could not be created, written or read
    #[error(transparent)]
    Filesystem(KeystoreError),

    /// Entropy or prime search failure
    #[error("error when generating rsa keypair: {0}")]
    KeyGeneration(KeyError),

    /// PEM/DER encoding or parsing failure
    #[error(transparent)]
    Encoding(KeyError),

    /// Malformed key or RNG failure during signing
    #[error("error from signing: {0}")]
    Signing(SigningError),

    /// The response could not be encoded or written
    #[error("could not encode response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_usage() {
            EXIT_USAGE
        } else {
            EXIT_FAILURE
        }
    }
}

impl From<msgsign_core::Error> for CliError {
    fn from(err: msgsign_core::Error) -> Self {
        match err {
            msgsign_core::Error::Config { .. } => Self::Config(err),
            msgsign_core::Error::Logging(_) => Self::Logging(err),
        }
    }
}

impl From<KeyError> for CliError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::Generation { .. } => Self::KeyGeneration(err),
            KeyError::Encoding { .. } | KeyError::Decoding { .. } => Self::Encoding(err),
        }
    }
}

impl From<KeystoreError> for CliError {
    fn from(err: KeystoreError) -> Self {
        match err {
            KeystoreError::Key(key_err) => key_err.into(),
            other => Self::Filesystem(other),
        }
    }
}

impl From<SigningError> for CliError {
    fn from(err: SigningError) -> Self {
        match err {
            SigningError::InvalidField { .. } => Self::Usage(err.to_string()),
            other => Self::Signing(other),
        }
    }
}
