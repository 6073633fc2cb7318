//! CLI error types.

use std::fmt;
use std::process::ExitCode;

/// Exit status for failed commands.
pub const EXIT_FAILURE: u8 = 1;

/// Exit status when the user interrupted the command.
pub const EXIT_INTERRUPTED: u8 = 130;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Domain validation or storage error.
    Cluster(doctor_core::Error),
    /// Output formatting error.
    Format(String),
    /// Async runtime failure.
    Runtime(String),
    /// IO error.
    Io(std::io::Error),
}

impl CliError {
    /// Whether this is an expected outcome that only needs a short notice.
    ///
    /// Registering a name that is taken and removing one that is not are
    /// reported without the generic `Error:` prefix.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        matches!(self, Self::Cluster(e) if e.is_conflict_or_missing())
    }

    /// Numeric exit status for this error.
    #[must_use]
    pub const fn exit_status(&self) -> u8 {
        match self {
            Self::Cluster(doctor_core::Error::Canceled) => EXIT_INTERRUPTED,
            _ => EXIT_FAILURE,
        }
    }

    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Exit status after clap rejected the arguments or printed help.
///
/// Help and version requests succeed; every usage error, including running
/// without arguments, fails with [`EXIT_FAILURE`].
#[must_use]
pub fn usage_exit_status(err: &clap::Error) -> u8 {
    if err.use_stderr() { EXIT_FAILURE } else { 0 }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cluster(e) => write!(f, "{e}"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::Runtime(msg) => write!(f, "runtime error: {msg}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cluster(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<doctor_core::Error> for CliError {
    fn from(err: doctor_core::Error) -> Self {
        Self::Cluster(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
