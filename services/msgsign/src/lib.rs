//! Signs a short message with the local RSA key and reports the result as JSON.
//!
//! Pipeline: validate arguments, provision or load the keypair, sign the
//! SHA-256 digest of the message, then emit a [`SignatureResponse`].

pub mod error;
pub mod response;

use std::ffi::OsString;
use std::io::Write;

use msgsign_core::SignerConfig;
use msgsign_crypto::{key_id, MessageSigner, SigningRequest};
use msgsign_keystore::KeyStore;

pub use error::{CliError, EXIT_FAILURE, EXIT_USAGE};
pub use response::SignatureResponse;

/// One-line usage summary printed alongside argument errors.
pub const USAGE: &str = "usage: msgsign <message>";

/// Turns the command-line arguments (without the program name) into a
/// validated signing request.
pub fn parse_args<I>(args: I) -> Result<SigningRequest, CliError>
where
    I: IntoIterator<Item = OsString>,
{
    let args: Vec<OsString> = args.into_iter().collect();
    if args.len() != 1 {
        return Err(CliError::Usage(format!(
            "wrong number of arguments: expected 1, got {}",
            args.len()
        )));
    }

    let message = args
        .into_iter()
        .next()
        .and_then(|arg| arg.into_string().ok())
        .ok_or_else(|| CliError::Usage("message must be valid UTF-8".to_string()))?;

    Ok(SigningRequest::new(message)?)
}

/// Signs `request` with the keypair described by `config` and writes the
/// response to `out`.
pub fn run<W: Write>(
    request: SigningRequest,
    config: &SignerConfig,
    out: W,
) -> Result<SignatureResponse, CliError> {
    let material = KeyStore::new(config).open()?;

    let signer = MessageSigner::new(material.private_key);
    let signature = signer.sign(&request)?;

    tracing::info!(
        key_id = %key_id(&material.public_key),
        origin = ?material.origin,
        message_chars = request.message().chars().count(),
        "Message signed"
    );

    let response = SignatureResponse::new(request.into_message(), &signature, &material.public_key)?;
    response.write_to(out)?;
    Ok(response)
}
