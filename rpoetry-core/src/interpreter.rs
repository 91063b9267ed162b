use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;
use crate::process::{ExternalCommand, LineStream};

/// Program used when nothing else is configured.
pub const DEFAULT_RSCRIPT: &str = "Rscript";

/// The external interpreter that evaluates inline expressions.
///
/// An invocation is `program [leading_args...] eval_flag <expression>`, which
/// for the default configuration is `Rscript -e <expression>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    program: OsString,
    leading_args: Vec<OsString>,
    eval_flag: OsString,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(DEFAULT_RSCRIPT)
    }
}

impl Interpreter {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            eval_flag: "-e".into(),
        }
    }

    pub fn with_eval_flag(mut self, flag: impl Into<OsString>) -> Self {
        self.eval_flag = flag.into();
        self
    }

    /// Arguments placed before the evaluation flag (e.g. `--vanilla`).
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Build the argv that evaluates `expr`. The expression is a single
    /// argument and is passed through verbatim.
    pub fn command(&self, expr: &str) -> ExternalCommand {
        ExternalCommand::new(&self.program)
            .args(&self.leading_args)
            .arg(&self.eval_flag)
            .arg(expr)
    }

    pub fn eval(&self, expr: impl Into<String>) -> Invocation<'_> {
        Invocation {
            interpreter: self,
            expr: expr.into(),
            current_dir: None,
            quiet: false,
        }
    }
}

/// A pending evaluation of one expression.
pub struct Invocation<'a> {
    interpreter: &'a Interpreter,
    expr: String,
    current_dir: Option<PathBuf>,
    quiet: bool,
}

impl Invocation<'_> {
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Suppress forwarding of the child's output to the terminal.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn to_command(&self) -> ExternalCommand {
        let cmd = self.interpreter.command(&self.expr);
        match &self.current_dir {
            Some(dir) => cmd.current_dir(dir),
            None => cmd,
        }
    }

    pub fn stream(&self) -> Result<LineStream> {
        self.to_command().spawn()
    }

    /// Evaluate the expression, writing each output line to `out` as it
    /// arrives, and fail if the interpreter exits non-zero.
    pub fn run<W: Write + ?Sized>(self, out: &mut W) -> Result<()> {
        let mut stream = self.stream()?;
        for line in stream.by_ref() {
            let line = line?;
            tracing::debug!(target: "rpoetry::output", "{line}");
            if !self.quiet {
                writeln!(out, "{line}")?;
                out.flush()?;
            }
        }
        stream.finish()
    }
}
