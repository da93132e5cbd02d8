//! msgsign CLI
//!
//! Signs its single argument with the local RSA key and prints
//! `{"message", "signature", "pubkey"}` as one JSON line.

use std::process::ExitCode;

use msgsign::{parse_args, run, CliError, USAGE};
use msgsign_core::{logging, SignerConfig};

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Signing failed");
            eprintln!("Error: {}", e);
            if e.is_usage() {
                eprintln!("{}", USAGE);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn try_main() -> Result<(), CliError> {
    let config = SignerConfig::from_env()?;
    logging::init(config.log_format)?;

    let request = parse_args(std::env::args_os().skip(1))?;

    let stdout = std::io::stdout();
    run(request, &config, stdout.lock())?;
    Ok(())
}
