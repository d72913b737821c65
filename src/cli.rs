//! Command-line arguments of the portal service.

use std::process::ExitCode;

use clap::Parser;

/// Backend for xdg-desktop-portal serving Settings, Lockdown, AppChooser and
/// Email.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "xdg-desktop-portal-holo", version)]
pub struct Cli {
    /// Print debug information
    #[arg(short, long)]
    pub verbose: bool,

    /// Replace a running instance
    #[arg(short, long)]
    pub replace: bool,
}

impl Cli {
    /// Parses the process arguments.
    ///
    /// # Errors
    /// Returns the exit code to terminate with after clap has printed help,
    /// the version, or an argument error.
    pub fn from_args() -> Result<Self, ExitCode> {
        Self::try_parse().map_err(|error| {
            let _ = error.print();
            exit_code(&error)
        })
    }
}

/// Exit code for a clap outcome: success for `--help` and `--version`,
/// failure for invalid arguments.
pub fn exit_code(error: &clap::Error) -> ExitCode {
    if error.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use clap::{Parser, error::ErrorKind};

    use super::Cli;

    #[test]
    fn flags_default_off() {
        let cli = Cli::try_parse_from(["xdg-desktop-portal-holo"]).unwrap();

        assert!(!cli.verbose);
        assert!(!cli.replace);
    }

    #[test]
    fn short_and_long_flags_parse() {
        let cli = Cli::try_parse_from(["xdg-desktop-portal-holo", "-v", "--replace"]).unwrap();

        assert!(cli.verbose);
        assert!(cli.replace);
    }

    #[test]
    fn version_is_not_an_error_exit() {
        let error = Cli::try_parse_from(["xdg-desktop-portal-holo", "--version"]).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::DisplayVersion);
        assert!(!error.use_stderr());
        assert_eq!(
            error.to_string().trim(),
            format!("xdg-desktop-portal-holo {}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn unknown_arguments_fail() {
        let error = Cli::try_parse_from(["xdg-desktop-portal-holo", "--bogus"]).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::UnknownArgument);
        assert!(error.use_stderr());
    }
}
