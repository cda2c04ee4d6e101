/// Errors from the `op` subprocess layer.
use thiserror::Error;

/// Typed errors raised while invoking the password-manager CLI.
#[derive(Debug, Error)]
pub enum OpError {
    /// The configured binary could not be found on disk or in `PATH`.
    #[error("'{bin}' not found. Install the 1Password CLI or point --op-bin at it")]
    NotInstalled {
        /// The binary that was looked up.
        bin: String,
    },

    /// The process could not be started for a reason other than a missing binary.
    #[error("failed to run '{bin}': {source}")]
    Spawn {
        /// The binary that failed to start.
        bin: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The CLI wrote to its error stream or exited unsuccessfully.
    ///
    /// `stderr` is kept verbatim so the caller can forward it unchanged.
    #[error("`op {args}` failed: {}", failure_detail(.stderr, .code))]
    CommandFailed {
        /// Space-joined argument list, for context.
        args: String,
        /// Everything the process wrote to stderr, byte for byte.
        stderr: Vec<u8>,
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
    },

    /// Standard output was not the JSON shape we expected.
    #[error("could not parse output of {context}: {source}")]
    Parse {
        /// Which call produced the output.
        context: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Standard output parsed as JSON but had the wrong top-level shape.
    #[error("unexpected output of {context}: expected {expected}")]
    UnexpectedShape {
        /// Which call produced the output.
        context: String,
        /// Human description of the expected shape.
        expected: &'static str,
    },
}

/// Stderr text when there is any, otherwise the exit status.
fn failure_detail(stderr: &[u8], code: &Option<i32>) -> String {
    if !stderr.is_empty() {
        return String::from_utf8_lossy(stderr).trim_end().to_owned();
    }
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "terminated by a signal".to_owned(),
    }
}
