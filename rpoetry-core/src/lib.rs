//! # rpoetry-core
//!
//! Shared runtime for the `rpoetry` and `precommitr` command-line tools,
//! which drive R package development (devtools, usethis, renv) through
//! `Rscript`.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`process`] | spawn a command and stream its stdout line by line |
//! | [`interpreter`] | evaluate an inline expression with `Rscript -e` |
//! | [`probe`] | check whether R packages are installed |
//! | [`stale`] | find `.Rmd` sources whose `.md` output is missing or out of date |
//! | [`report`] | user-facing message for a failed command |
//! | [`rexpr`] | render strings, paths and character vectors as R literals |
//! | [`devtools`] | the `devtools::*` command set both tools share |
//! | [`config`] | interpreter and probe settings from env and flags |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! Everything is synchronous: at most one child process runs at a time and
//! the caller blocks while its output is drained.

pub mod config;
pub mod devtools;
pub mod error;
pub mod interpreter;
pub mod logging;
pub mod probe;
pub mod process;
pub mod report;
pub mod rexpr;
pub mod stale;

pub use config::ToolchainConfig;
pub use error::{Error, Result};
pub use interpreter::{Interpreter, Invocation};
pub use probe::{is_installed, CapabilityReport};
pub use process::{CancelHandle, ExternalCommand, LineStream, ProcessResult};
pub use stale::{StaleFileSelector, Timestamps};
