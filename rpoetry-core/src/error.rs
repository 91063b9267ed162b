use std::path::PathBuf;

/// Errors produced while driving the external R toolchain.
///
/// Every variant maps to process exit status 1 at the CLI boundary.
#[derive(Debug)]
pub enum Error {
    /// The child process could not be started (program missing, not executable, ...).
    Spawn {
        command: String,
        source: std::io::Error,
    },
    /// Reading the child's output or reaping it failed.
    Io(std::io::Error),
    /// The child ran to completion and exited non-zero.
    Execution { command: String, code: i32 },
    /// The child was terminated through a [`CancelHandle`](crate::process::CancelHandle).
    Cancelled { command: String },
    /// A required R package is not installed.
    CapabilityMissing(String),
    /// A path could not be inspected while walking a package tree.
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Exit status the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Exit code of the failed child, if this is an execution failure.
    pub fn process_code(&self) -> Option<i32> {
        match self {
            Error::Execution { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Spawn { command, source } => {
                write!(f, "failed to start `{command}`: {source}")
            }
            Error::Io(err) => write!(f, "I/O error: {err}"),
            Error::Execution { command, code } => {
                write!(f, "`{command}` exited with status {code}")
            }
            Error::Cancelled { command } => write!(f, "`{command}` was cancelled"),
            Error::CapabilityMissing(name) => write!(f, "{name} is not installed."),
            Error::Filesystem { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Spawn { source, .. } | Error::Filesystem { source, .. } => Some(source),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_missing_message() {
        let err = Error::CapabilityMissing("devtools".into());
        assert_eq!(err.to_string(), "devtools is not installed.");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn execution_carries_code_and_command() {
        let err = Error::Execution {
            command: "Rscript -e q()".into(),
            code: 3,
        };
        assert_eq!(err.process_code(), Some(3));
        assert!(err.to_string().contains("Rscript -e q()"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn io_error_has_source() {
        let err: Error = std::io::Error::other("boom").into();
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.process_code(), None);
    }
}
