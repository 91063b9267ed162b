//! # precommitr-cli
//!
//! The `precommitr` binary: a thin front end over `devtools`.
//!
//! | Command | R call |
//! |---------|--------|
//! | `precommitr create <path>` | `devtools::create(path)` |
//! | `precommitr document [--pkg p]` | `devtools::document(p)` |
//! | `precommitr check [--pkg p]` | `devtools::check(p)` |
//! | `precommitr load-all [--pkg p]` | `devtools::load_all(p)` |
//! | `precommitr build-rmd [--pkg p]` | `devtools::build_rmd(<stale .Rmd files>, p)` |
//!
//! Parsing lives in [`cli`]; [`run`] dispatches a parsed command given the
//! interpreter and the startup capability report.

pub mod cli;

use std::io::Write;

use colored::Colorize;
use rpoetry_core::{devtools, CapabilityReport, Interpreter, Result};

use cli::Commands;

/// R packages that must be installed before any command runs.
pub const REQUIRED: &[&str] = &["devtools"];

/// Prefix of the environment variables read by
/// [`ToolchainConfig::from_env`](rpoetry_core::ToolchainConfig::from_env).
pub const ENV_PREFIX: &str = "PRECOMMITR";

pub fn run(
    command: Commands,
    interpreter: &Interpreter,
    report: &CapabilityReport,
    out: &mut dyn Write,
) -> Result<()> {
    report.ensure()?;

    match command {
        Commands::Create { path } => devtools::create(interpreter, &path, out),
        Commands::Document(args) => devtools::document(interpreter, &args.pkg, out),
        Commands::Check(args) => devtools::check(interpreter, &args.pkg, out),
        Commands::LoadAll(args) => devtools::load_all(interpreter, &args.pkg, out),
        Commands::BuildRmd(args) => {
            if devtools::build_rmd(interpreter, &args.pkg, out)? == 0 {
                writeln!(out, "{}", "All R Markdown outputs are up to date.".dimmed())?;
            }
            Ok(())
        }
    }
}
