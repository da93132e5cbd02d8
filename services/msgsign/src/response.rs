//! The signed response document written to stdout.

use std::io::Write;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use msgsign_crypto::{public_key_to_pem, RsaPublicKey};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// JSON output of a signing invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureResponse {
    /// The original input string
    pub message: String,
    /// Base64 (standard alphabet, padded) PKCS#1 v1.5 signature
    pub signature: String,
    /// PKCS#1 `RSA PUBLIC KEY` PEM of the signing key
    #[serde(rename = "pubkey")]
    pub public_key: String,
}

impl SignatureResponse {
    pub fn new(
        message: String,
        signature: &[u8],
        public_key: &RsaPublicKey,
    ) -> Result<Self, CliError> {
        Ok(Self {
            message,
            signature: STANDARD.encode(signature),
            public_key: public_key_to_pem(public_key)?,
        })
    }

    /// Writes the response as a single JSON line.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<(), CliError> {
        serde_json::to_writer(&mut out, self)?;
        out.write_all(b"\n").map_err(serde_json::Error::io)?;
        out.flush().map_err(serde_json::Error::io)?;
        Ok(())
    }
}
