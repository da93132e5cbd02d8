//! RSA key management: generation, PKCS#1 PEM encoding and parsing.
//!
//! Both keys are stored as PEM-armored PKCS#1 DER, never as the more general
//! SubjectPublicKeyInfo / PKCS#8 containers:
//! - private keys under the `RSA PRIVATE KEY` label
//! - public keys under the `RSA PUBLIC KEY` label

use std::fmt;

use rand::rngs::OsRng;
use rsa::pkcs1::{
    DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding,
};
use rsa::rand_core::CryptoRngCore;
use rsa::{RsaPrivateKey, RsaPublicKey};
use thiserror::Error;
use zeroize::Zeroizing;

/// Modulus size of every provisioned keypair.
pub const KEY_BITS: usize = 4096;

/// Which half of a keypair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Private,
    Public,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Private => write!(f, "private"),
            Self::Public => write!(f, "public"),
        }
    }
}

/// Errors that can occur while generating, encoding or parsing keys.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Key generation failed: {reason}")]
    Generation { reason: String },

    #[error("Could not encode {kind} key: {reason}")]
    Encoding { kind: KeyKind, reason: String },

    #[error("Could not parse {kind} key: {reason}")]
    Decoding { kind: KeyKind, reason: String },
}

/// An RSA private key together with its derived public key.
#[derive(Clone)]
pub struct RsaKeyPair {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
}

impl RsaKeyPair {
    /// Generates a fresh RSA-4096 keypair from the operating system RNG.
    pub fn generate() -> Result<Self, KeyError> {
        Self::generate_with_bits(&mut OsRng, KEY_BITS)
    }

    /// Generates a keypair of an arbitrary modulus size.
    ///
    /// Production code always goes through [`RsaKeyPair::generate`]; smaller
    /// sizes exist so tests do not pay for 4096-bit prime searches.
    pub fn generate_with_bits<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bits: usize,
    ) -> Result<Self, KeyError> {
        let private_key = RsaPrivateKey::new(rng, bits).map_err(|e| KeyError::Generation {
            reason: e.to_string(),
        })?;
        Ok(Self::from_private_key(private_key))
    }

    /// Builds a keypair by deriving the public half of `private_key`.
    pub fn from_private_key(private_key: RsaPrivateKey) -> Self {
        let public_key = private_key.to_public_key();
        Self {
            private_key,
            public_key,
        }
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    pub fn into_parts(self) -> (RsaPrivateKey, RsaPublicKey) {
        (self.private_key, self.public_key)
    }
}

impl fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("key_id", &key_id(&self.public_key))
            .finish_non_exhaustive()
    }
}

/// Encodes a private key as a PKCS#1 `RSA PRIVATE KEY` PEM document.
pub fn private_key_to_pem(private_key: &RsaPrivateKey) -> Result<Zeroizing<String>, KeyError> {
    private_key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| KeyError::Encoding {
            kind: KeyKind::Private,
            reason: e.to_string(),
        })
}

/// Encodes a public key as a PKCS#1 `RSA PUBLIC KEY` PEM document.
pub fn public_key_to_pem(public_key: &RsaPublicKey) -> Result<String, KeyError> {
    public_key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| KeyError::Encoding {
            kind: KeyKind::Public,
            reason: e.to_string(),
        })
}

/// Parses a PKCS#1 `RSA PRIVATE KEY` PEM document.
pub fn parse_private_key_pem(pem: &[u8]) -> Result<RsaPrivateKey, KeyError> {
    let text = pem_text(pem, KeyKind::Private)?;
    RsaPrivateKey::from_pkcs1_pem(text).map_err(|e| KeyError::Decoding {
        kind: KeyKind::Private,
        reason: e.to_string(),
    })
}

/// Parses a PKCS#1 `RSA PUBLIC KEY` PEM document.
pub fn parse_public_key_pem(pem: &[u8]) -> Result<RsaPublicKey, KeyError> {
    let text = pem_text(pem, KeyKind::Public)?;
    RsaPublicKey::from_pkcs1_pem(text).map_err(|e| KeyError::Decoding {
        kind: KeyKind::Public,
        reason: e.to_string(),
    })
}

// PEM is ASCII armor, so anything that is not UTF-8 cannot contain a block.
fn pem_text(pem: &[u8], kind: KeyKind) -> Result<&str, KeyError> {
    std::str::from_utf8(pem).map_err(|_| KeyError::Decoding {
        kind,
        reason: "no PEM block found".to_string(),
    })
}

/// Generates a stable identifier for a public key.
///
/// BLAKE3 over the PKCS#1 DER encoding, first 16 bytes as hex. Only used to
/// correlate log lines, never for any security decision.
pub fn key_id(public_key: &RsaPublicKey) -> String {
    match public_key.to_pkcs1_der() {
        Ok(der) => {
            let hash = blake3::hash(der.as_bytes());
            hex::encode(&hash.as_bytes()[..16])
        }
        Err(_) => "unknown".to_string(),
    }
}
