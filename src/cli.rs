use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::cipher::Mode;
use crate::error::{Result, VigenError};
use crate::key::Key;

pub const USAGE: &str = "\
Usage: vigen [OPTION]... [FILE]...
  -k,  create secret key
  -e,  encrypt file
  -d,  decrypt file

Example: vigen -k secret_key -e file
         vigen -k secret_key -d file
";

/// Printed after every usage error.
pub const HINT: &str = "Try 'vigen -h' for more information.";

#[derive(Parser, Debug)]
#[command(
    name = "vigen",
    about = "Encrypt or decrypt a text file with a Vigenère cipher",
    override_help = USAGE,
    disable_help_flag = true
)]
pub struct Args {
    /// Print usage and exit
    #[arg(short = 'h', long = "help", exclusive = true)]
    pub help: bool,

    /// Secret key; only its letters are used
    #[arg(short = 'k', value_name = "KEY", allow_hyphen_values = true)]
    pub key: Option<String>,

    /// Encrypt FILE into FILE.vig
    #[arg(short = 'e', conflicts_with = "decrypt")]
    pub encrypt: bool,

    /// Decrypt FILE into clear_text.txt
    #[arg(short = 'd')]
    pub decrypt: bool,

    /// Input file; prompted for on stdin when omitted
    pub file: Option<PathBuf>,
}

#[derive(Debug)]
pub enum Command {
    Help,
    Run(Invocation),
}

#[derive(Debug)]
pub struct Invocation {
    pub key: Key,
    pub mode: Mode,
    pub file: Option<PathBuf>,
}

impl Args {
    pub fn try_from_iter<I, T>(itr: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Args::try_parse_from(itr).map_err(|e| {
            let rendered = e.to_string();
            let first = rendered.lines().next().unwrap_or("error: invalid arguments");
            VigenError::Usage(first.to_string())
        })
    }

    /// Checks the parsed flags. A missing mode flag is a usage error, except
    /// for `-k -e FILE`: there the key was left out and `-e` slid into its
    /// place, which is reported as a missing key.
    pub fn into_command(self) -> Result<Command> {
        if self.help {
            return Ok(Command::Help);
        }

        let raw_key = self
            .key
            .ok_or_else(|| VigenError::Usage("error: a secret key is required (-k <KEY>)".into()))?;
        let shifted = raw_key == "-e" || raw_key == "-d";

        let mode = match (self.encrypt, self.decrypt) {
            (true, false) => Mode::Encrypt,
            (false, true) => Mode::Decrypt,
            _ if shifted && self.file.is_some() => return Err(VigenError::MissingKey),
            _ => {
                return Err(VigenError::Usage(
                    "error: one of -e (encrypt) or -d (decrypt) is required".into(),
                ))
            }
        };
        let key = Key::parse(&raw_key)?;

        Ok(Command::Run(Invocation {
            key,
            mode,
            file: self.file,
        }))
    }
}

pub fn print_usage() -> Result<()> {
    Args::command().print_help()?;
    Ok(())
}

/// Prints `"> "` and reads the input file name from one line of `input`.
pub fn prompt_filename<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<PathBuf> {
    write!(output, "> ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(PathBuf::from(line.trim_end_matches(['\r', '\n'])))
}

impl Invocation {
    /// The explicit FILE argument, or whatever the user types at the prompt.
    pub fn filename(&self) -> Result<PathBuf> {
        match &self.file {
            Some(file) => Ok(file.clone()),
            None => {
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                prompt_filename(&mut stdin.lock(), &mut stdout.lock())
            }
        }
    }
}
