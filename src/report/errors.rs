/// Errors from the report layer.
use thiserror::Error;

use crate::op::OpError;

/// Errors that can abort a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A directory lookup failed.
    #[error(transparent)]
    Op(#[from] OpError),

    /// Writing the rendered report to stdout failed.
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Exit code mapping for `ReportError` variants.
impl ReportError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Op(OpError::NotInstalled { .. }) => 127,
            Self::Op(_) => 1,
            Self::Output(_) if self.is_broken_pipe() => 0,
            Self::Output(_) => 74,
        }
    }

    /// Whether stdout was closed by the reader (e.g., piped into `head`).
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Output(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }

    /// Raw error output from the CLI when this is a fail-fast lookup failure.
    ///
    /// The caller forwards it to stderr unchanged.
    #[must_use]
    pub fn forwarded_stderr(&self) -> Option<&[u8]> {
        match self {
            Self::Op(OpError::CommandFailed { stderr, .. }) if !stderr.is_empty() => {
                Some(stderr.as_slice())
            }
            _ => None,
        }
    }
}
