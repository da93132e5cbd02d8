//! Error types for key storage operations.

use std::path::PathBuf;

use msgsign_crypto::{KeyError, KeyKind};
use thiserror::Error;

/// Errors that can occur while provisioning or loading keys.
#[derive(Debug, Error)]
pub enum KeystoreError {
    /// The key directory could not be created
    #[error("could not create directory for keys {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A freshly generated key could not be persisted
    #[error("could not write file for {kind} key {}: {source}", .path.display())]
    WriteKey {
        kind: KeyKind,
        path: PathBuf,
        source: std::io::Error,
    },

    /// An existing key file could not be read
    #[error("could not read {kind} pem file {}: {source}", .path.display())]
    ReadKey {
        kind: KeyKind,
        path: PathBuf,
        source: std::io::Error,
    },

    /// Generation, encoding or parsing failed
    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Result type for keystore operations.
pub type KeystoreResult<T> = Result<T, KeystoreError>;
