//! Line-by-line streaming of a child process's standard output.
//!
//! [`ExternalCommand`] is an inert argv description. Calling
//! [`ExternalCommand::spawn`] starts the process and hands back a
//! [`LineStream`], which yields stdout lines as soon as the child writes them.
//! The exit status only becomes observable once the stream has been drained
//! through [`LineStream::finish`] or [`LineStream::wait`].
//!
//! The stream owns the child. Dropping it early kills and reaps the process.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::error::{Error, Result};

/// An argv-style invocation: program, ordered arguments, optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: OsString,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the child in `dir` instead of the parent's working directory.
    ///
    /// The parent's own working directory is never changed.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn get_args(&self) -> impl Iterator<Item = &OsStr> {
        self.args.iter().map(OsString::as_os_str)
    }

    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Start the process with stdout piped and stdin/stderr inherited.
    pub fn spawn(&self) -> Result<LineStream> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!(command = %self, dir = ?self.current_dir, "spawning child process");
        let mut child = cmd.spawn().map_err(|source| Error::Spawn {
            command: self.to_string(),
            source,
        })?;
        let reader = child.stdout.take().map(BufReader::new);

        Ok(LineStream {
            command: self.clone(),
            reader,
            shared: Arc::new(Shared {
                child: Mutex::new(child),
                killed: AtomicBool::new(false),
            }),
            reaped: false,
        })
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Terminal status of a drained invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    Success,
    Failed(i32),
    Cancelled,
}

/// Interval between exit checks while reaping. The child lock is only held
/// for each individual check.
const REAP_POLL: Duration = Duration::from_millis(10);

struct Shared {
    child: Mutex<Child>,
    /// Set only when a kill was delivered to a still-running child.
    killed: AtomicBool,
}

impl Shared {
    fn child(&self) -> MutexGuard<'_, Child> {
        self.child.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Terminates a running [`LineStream`] from any thread.
#[derive(Clone)]
pub struct CancelHandle {
    shared: Arc<Shared>,
}

impl CancelHandle {
    /// Kill the child if it is still running. The stream then reports
    /// [`ProcessResult::Cancelled`]. A child that already exited keeps its
    /// own status.
    pub fn cancel(&self) -> Result<()> {
        let mut child = self.shared.child();
        if child.try_wait()?.is_some() {
            return Ok(());
        }
        child.kill()?;
        self.shared.killed.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Whether a kill actually reached the child.
    pub fn is_cancelled(&self) -> bool {
        self.shared.killed.load(Ordering::SeqCst)
    }
}

/// Lazy, single-pass sequence of stdout lines from a running child.
///
/// Lines are yielded without their trailing `\n` (or `\r\n`) and decoded
/// lossily as UTF-8. Empty lines are yielded as empty strings.
pub struct LineStream {
    command: ExternalCommand,
    reader: Option<BufReader<ChildStdout>>,
    shared: Arc<Shared>,
    reaped: bool,
}

impl LineStream {
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Drain the remaining output, reap the child and report its status.
    pub fn wait(mut self) -> Result<ProcessResult> {
        self.drain_and_reap()
    }

    /// Drain the remaining output and reap the child, turning anything other
    /// than a zero exit into an error.
    pub fn finish(mut self) -> Result<()> {
        match self.drain_and_reap()? {
            ProcessResult::Success => Ok(()),
            ProcessResult::Failed(code) => {
                tracing::debug!(command = %self.command, code, "child process failed");
                Err(Error::Execution {
                    command: self.command.to_string(),
                    code,
                })
            }
            ProcessResult::Cancelled => {
                tracing::debug!(command = %self.command, "child process cancelled");
                Err(Error::Cancelled {
                    command: self.command.to_string(),
                })
            }
        }
    }

    fn drain_and_reap(&mut self) -> Result<ProcessResult> {
        for line in self.by_ref() {
            line?;
        }
        self.reader = None;

        let status = loop {
            if let Some(status) = self.shared.child().try_wait()? {
                break status;
            }
            std::thread::sleep(REAP_POLL);
        };
        self.reaped = true;

        if status.success() {
            Ok(ProcessResult::Success)
        } else if self.shared.killed.load(Ordering::SeqCst) {
            Ok(ProcessResult::Cancelled)
        } else {
            Ok(ProcessResult::Failed(exit_code(status)))
        }
    }
}

impl Iterator for LineStream {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        let mut buf = Vec::new();
        loop {
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) if buf.is_empty() => {
                    // End of output: release the pipe before the child is reaped.
                    self.reader = None;
                    return None;
                }
                Ok(_) => {
                    if buf.last() == Some(&b'\n') {
                        buf.pop();
                        if buf.last() == Some(&b'\r') {
                            buf.pop();
                        }
                    }
                    return Some(Ok(String::from_utf8_lossy(&buf).into_owned()));
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.reader = None;
                    return Some(Err(Error::Io(err)));
                }
            }
        }
    }
}

impl Drop for LineStream {
    fn drop(&mut self) {
        if self.reaped {
            return;
        }
        self.reader = None;
        let mut child = self.shared.child();
        if let Ok(None) = child.try_wait() {
            tracing::debug!(command = %self.command, "killing undrained child process");
            let _ = child.kill();
        }
        let _ = child.wait();
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => -1,
    }
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
