//! Message Signing Service
//!
//! Signs short text messages with RSASSA-PKCS1-v1_5 over their SHA-256
//! digest. Requests are validated before any key is touched so that an
//! oversized message is rejected without side effects.

use rand::rngs::OsRng;
use rsa::rand_core::CryptoRngCore;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::keys::key_id;

/// Longest message accepted for signing, counted in characters.
///
/// The count is in Unicode scalar values, so non-ASCII input may exceed
/// 250 bytes.
pub const MAX_MESSAGE_CHARS: usize = 250;

/// Errors that can occur during signing operations.
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Cryptographic error: {reason}")]
    CryptoError { reason: String },

    #[error("Signature verification failed")]
    VerificationFailed,
}

/// A validated message awaiting a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    message: String,
}

impl SigningRequest {
    /// Validates `message` against the length limit.
    pub fn new(message: impl Into<String>) -> Result<Self, SigningError> {
        let message = message.into();
        let length = message.chars().count();

        if length > MAX_MESSAGE_CHARS {
            return Err(SigningError::InvalidField {
                field: "message".to_string(),
                reason: format!(
                    "input must be at most {} characters (got {})",
                    MAX_MESSAGE_CHARS, length
                ),
            });
        }

        Ok(Self { message })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }

    /// SHA-256 digest of the message's UTF-8 bytes.
    pub fn digest(&self) -> [u8; 32] {
        sha256_digest(self.message.as_bytes())
    }
}

/// Compute the SHA-256 digest of `data`.
pub fn sha256_digest(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Holds the private key for the duration of a signing run.
pub struct MessageSigner {
    private_key: RsaPrivateKey,
    public_key_id: String,
}

impl MessageSigner {
    pub fn new(private_key: RsaPrivateKey) -> Self {
        let public_key_id = key_id(&private_key.to_public_key());
        Self {
            private_key,
            public_key_id,
        }
    }

    /// Gets the public key identifier.
    pub fn public_key_id(&self) -> &str {
        &self.public_key_id
    }

    /// Signs a request and returns the raw signature bytes.
    ///
    /// The signature length always equals the modulus size in bytes.
    pub fn sign(&self, request: &SigningRequest) -> Result<Vec<u8>, SigningError> {
        self.sign_with_rng(&mut OsRng, request)
    }

    /// Signs a request drawing blinding randomness from `rng`.
    pub fn sign_with_rng<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        request: &SigningRequest,
    ) -> Result<Vec<u8>, SigningError> {
        let hashed = request.digest();

        let signature = self
            .private_key
            .sign_with_rng(rng, Pkcs1v15Sign::new::<Sha256>(), &hashed)
            .map_err(|e| SigningError::CryptoError {
                reason: e.to_string(),
            })?;

        tracing::debug!(
            key_id = %self.public_key_id,
            message_chars = request.message().chars().count(),
            signature_len = signature.len(),
            "Signature computed"
        );

        Ok(signature)
    }
}

/// Verifies a PKCS#1 v1.5 signature over the SHA-256 digest of `message`.
pub fn verify(
    public_key: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<(), SigningError> {
    let hashed = sha256_digest(message);
    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &hashed, signature)
        .map_err(|_| SigningError::VerificationFailed)
}
