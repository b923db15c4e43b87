use anyhow::Result;
use std::process::ExitCode;

mod cipher;
mod cli;
mod error;
mod key;
mod transform;

use cipher::Mode;
use cli::{Args, Command};
use error::VigenError;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            if e.downcast_ref::<VigenError>().is_some_and(VigenError::is_usage) {
                eprintln!("{}", cli::HINT);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let invocation = match Args::try_from_iter(std::env::args_os())?.into_command()? {
        Command::Help => {
            cli::print_usage()?;
            return Ok(());
        }
        Command::Run(invocation) => invocation,
    };

    let filename = invocation.filename()?;
    log::debug!("{:?} {} with {:?}", invocation.mode, filename.display(), invocation.key);

    let output = match invocation.mode {
        Mode::Encrypt => transform::encrypt_to_file(&filename, &invocation.key)?,
        Mode::Decrypt => transform::decrypt_to_file(&filename, &invocation.key)?,
    };
    log::info!("Wrote {}", output.display());

    Ok(())
}
