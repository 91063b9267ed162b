//! # rpoetry-cli
//!
//! The `rpoetry` binary: package scaffolding, checks and lockfile-managed
//! dependencies for R packages.
//!
//! | Command | R call |
//! |---------|--------|
//! | `rpoetry create <path>` | `devtools::create(path)` |
//! | `rpoetry document` / `check` / `load-all` | `devtools::document/check/load_all(pkg)` |
//! | `rpoetry build-rmd` | `devtools::build_rmd(<stale .Rmd files>, pkg)` |
//! | `rpoetry license [--license gpl3\|mit]` | `usethis::use_<license>_license()` in `pkg` |
//! | `rpoetry new <path>` | `devtools::create` + `renv::init` |
//! | `rpoetry add [--packages ..] [--upgrade] [--license ..]` | `renv::install`/`renv::update` + `renv::snapshot` |
//! | `rpoetry remove <packages..>` | `renv::remove` + `renv::snapshot` |
//! | `rpoetry test` / `install` / `build` | `devtools::test/install/build(pkg)` |
//!
//! Every command accepts `--pkg <dir>` (default `.`) except `create` and `new`.

pub mod cli;
pub mod commands;

use std::io::Write;

use colored::Colorize;
use rpoetry_core::{devtools, CapabilityReport, Interpreter, Result};

use cli::Commands;
use commands::renv;

/// R packages that must be installed before any command runs.
pub const REQUIRED: &[&str] = &["devtools", "renv", "usethis"];

/// Prefix of the environment variables read by
/// [`ToolchainConfig::from_env`](rpoetry_core::ToolchainConfig::from_env).
pub const ENV_PREFIX: &str = "RPOETRY";

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
        Commands::License { license, pkg } => {
            commands::license::run(interpreter, license, &pkg.pkg, out)
        }
        Commands::New { path } => renv::new(interpreter, &path, out),
        Commands::Add {
            packages,
            upgrade,
            license,
            pkg,
        } => {
            let request = renv::AddRequest {
                packages,
                upgrade,
                license,
            };
            if !renv::add(interpreter, &request, &pkg.pkg, out)? {
                writeln!(
                    out,
                    "{} Nothing to add. Pass --packages, --upgrade or --license.",
                    "!".yellow()
                )?;
            }
            Ok(())
        }
        Commands::Remove { packages, pkg } => renv::remove(interpreter, &packages, &pkg.pkg, out),
        Commands::Test(args) => devtools::test(interpreter, &args.pkg, out),
        Commands::Install(args) => devtools::install(interpreter, &args.pkg, out),
        Commands::Build(args) => devtools::build(interpreter, &args.pkg, out),
    }
}
