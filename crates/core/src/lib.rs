//! Core functionality shared across the msgsign workspace.
//!
//! This crate provides the process-wide configuration value, logging
//! initialisation and the core error type used by the signing pipeline.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{
    LogFormat, SignerConfig, DEFAULT_KEY_DIR_NAME, DEFAULT_PRIVATE_KEY_FILENAME,
    DEFAULT_PUBLIC_KEY_FILENAME, ENV_KEYPATH, ENV_LOG_FORMAT, ENV_PRIVKEY_FILENAME,
    ENV_PUBKEY_FILENAME,
};
pub use error::{Error, Result};
