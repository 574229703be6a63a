use crate::error::{DtExtractError, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;

pub const LOG_SUFFIX: &str = ".log";
pub const HEADER_SUFFIX: &str = "_test_data.h";

#[derive(Parser, Debug)]
#[command(name = "dt-extract")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract DT timing values from a capture log into a C++ test header")]
#[command(
    long_about = "dt-extract scans a data-capture log for DT,<seconds> records and writes \
                  them as a const double array into <log>_test_data.h for firmware tests."
)]
#[command(after_help = "EXAMPLES:\n  \
    dt-extract session.log          writes session_test_data.h\n  \
    dt-extract captures/row1.log    writes captures/row1_test_data.h")]
pub struct Cli {
    /// Capture log to scan
    pub logfile: String,
}

/// What `main` should do after argument parsing.
#[derive(Debug)]
pub enum ParseOutcome {
    Run(Cli),
    /// `--help` or `--version` was printed
    Exit,
}

impl Cli {
    pub fn parse_args() -> Result<ParseOutcome> {
        Self::parse_from_args(std::env::args_os())
    }

    pub fn parse_from_args<I, T>(args: I) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(ParseOutcome::Run(cli)),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                // printing help can only fail on a closed stdout
                let _ = e.print();
                Ok(ParseOutcome::Exit)
            }
            Err(e) => Err(DtExtractError::Usage {
                message: e
                    .to_string()
                    .trim_start_matches("error: ")
                    .trim_end()
                    .to_string(),
            }),
        }
    }
}

/// Replaces `.log` with `_test_data.h`. A path without `.log` comes back
/// unchanged, so the header is written over the input.
pub fn derive_output_path(log_path: &str) -> String {
    log_path.replace(LOG_SUFFIX, HEADER_SUFFIX)
}
