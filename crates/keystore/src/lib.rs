//! Key lifecycle management for msgsign.
//!
//! This crate owns the signing keypair on disk. A keypair is provisioned
//! lazily on first use and reused by every later invocation.
//!
//! # Filesystem Layout
//!
//! - `{key_dir}/{private_key_filename}`: PKCS#1 PEM, mode `0600`
//! - `{key_dir}/{public_key_filename}`: PKCS#1 PEM, mode `0644`
//!
//! # Concurrency
//!
//! No locking is applied across processes. The key directory is created
//! exclusively, so of two concurrent first runs exactly one generates keys;
//! the other takes the load path and may observe files that are not yet
//! written, which is a fatal read error.

pub mod error;
pub mod store;

pub use error::{KeystoreError, KeystoreResult};
pub use store::{
    KeyMaterial, KeyOrigin, KeyStore, KEY_DIR_MODE, PRIVATE_KEY_MODE, PUBLIC_KEY_MODE,
};
