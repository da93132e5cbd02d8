//! Cryptographic primitives and operations for msgsign.
//!
//! This crate provides the cryptographic foundation of the signer: RSA key
//! generation, PKCS#1 PEM encoding, SHA-256 hashing and PKCS#1 v1.5
//! signatures. All primitives come from the RustCrypto `rsa` and `sha2`
//! crates.
//!
//! # Supported Algorithms
//!
//! - **Keys**: RSA-4096, stored as PKCS#1 DER in PEM armor
//! - **Signatures**: RSASSA-PKCS1-v1_5 with SHA-256
//! - **Key identifiers**: BLAKE3 fingerprint of the public key (logging only)
//!
//! # Security Principles
//!
//! - Never roll custom cryptographic primitives
//! - Secrets must never be logged or hardcoded
//! - Private key PEM text is zeroized on drop

pub mod keys;
pub mod signing;

#[cfg(test)]
mod test_vectors;

pub use keys::{
    key_id, parse_private_key_pem, parse_public_key_pem, private_key_to_pem, public_key_to_pem,
    KeyError, KeyKind, RsaKeyPair, KEY_BITS,
};

pub use signing::{
    sha256_digest, verify, MessageSigner, SigningError, SigningRequest, MAX_MESSAGE_CHARS,
};

// Re-exported so downstream crates name key types without a direct rsa dependency.
pub use rsa::{RsaPrivateKey, RsaPublicKey};
