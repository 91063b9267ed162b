#![cfg(unix)]

use clap::Parser;
use precommitr_cli::cli::{Cli, Commands};
use precommitr_cli::REQUIRED;
use rpoetry_core::{CapabilityReport, Error, Interpreter};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Stand-in for Rscript: `sh -c <script> fake-rscript -e <expr>` prints the
/// expression it receives, then a trailer line, then exits with `code`.
fn fake_rscript(code: i32) -> Interpreter {
    Interpreter::new("sh").with_leading_args([
        "-c".to_string(),
        format!("echo \"eval: $2\"; echo done; exit {code}"),
        "fake-rscript".to_string(),
    ])
}

fn parse(args: &[&str]) -> Commands {
    let mut argv = vec!["precommitr"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().command
}

fn run(command: Commands, interpreter: &Interpreter) -> (Result<(), Error>, String) {
    let mut out = Vec::new();
    let result = precommitr_cli::run(command, interpreter, &CapabilityReport::satisfied(), &mut out);
    (result, String::from_utf8(out).unwrap())
}

// ── Parsing ─────────────────────────────────────────────────────────

#[test]
fn pkg_defaults_to_current_directory() {
    match parse(&["document"]) {
        Commands::Document(args) => assert_eq!(args.pkg, PathBuf::from(".")),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn subcommands_use_kebab_case() {
    assert!(matches!(parse(&["load-all", "--pkg", "p"]), Commands::LoadAll(_)));
    assert!(matches!(parse(&["build-rmd"]), Commands::BuildRmd(_)));
}

#[test]
fn create_requires_a_path() {
    assert!(Cli::try_parse_from(["precommitr", "create"]).is_err());
}

#[test]
fn global_flags_parse_after_subcommand() {
    let cli = Cli::try_parse_from(["precommitr", "check", "--debug", "--rscript", "/opt/Rscript"]).unwrap();
    assert!(cli.debug);
    assert_eq!(cli.rscript.as_deref(), Some("/opt/Rscript"));
}

#[test]
fn only_devtools_is_required() {
    assert_eq!(REQUIRED, &["devtools"]);
}

// ── Dispatch ────────────────────────────────────────────────────────

#[test]
fn successful_command_streams_output() {
    let tmp = TempDir::new().unwrap();
    let interp = fake_rscript(0);

    let (result, out) = run(parse(&["check", "--pkg", tmp.path().to_str().unwrap()]), &interp);

    assert!(result.is_ok());
    assert_eq!(
        out,
        format!("eval: devtools::check(\"{}\")\ndone\n", tmp.path().display())
    );
}

#[test]
fn failing_command_reports_exit_one_after_all_output() {
    let tmp = TempDir::new().unwrap();
    let interp = fake_rscript(3);

    let (result, out) = run(parse(&["document", "--pkg", tmp.path().to_str().unwrap()]), &interp);

    let err = result.unwrap_err();
    assert_eq!(err.process_code(), Some(3));
    assert_eq!(err.exit_code(), 1);
    assert!(out.contains("devtools::document"));
    assert!(out.ends_with("done\n"));
}

#[test]
fn missing_capability_short_circuits() {
    let interp = fake_rscript(0);
    let mut out = Vec::new();

    let err = precommitr_cli::run(
        parse(&["document"]),
        &interp,
        &CapabilityReport::with_missing(["devtools"]),
        &mut out,
    )
    .unwrap_err();

    assert!(matches!(err, Error::CapabilityMissing(ref name) if name == "devtools"));
    assert_eq!(err.to_string(), "devtools is not installed.");
    assert!(out.is_empty());
}

#[test]
fn probe_against_failing_interpreter_reports_devtools_missing() {
    let report = CapabilityReport::probe(&Interpreter::new("false"), REQUIRED);
    assert!(report.ensure().is_err());
}

#[test]
fn create_resolves_relative_path() {
    let interp = fake_rscript(0);

    let (result, out) = run(parse(&["create", "newpkg"]), &interp);

    assert!(result.is_ok());
    let expected = std::path::absolute("newpkg").unwrap();
    assert!(out.starts_with(&format!("eval: devtools::create(\"{}\")", expected.display())));
}

#[test]
fn build_rmd_with_nothing_stale_skips_interpreter() {
    let tmp = TempDir::new().unwrap();
    let interp = Interpreter::new(tmp.path().join("missing-rscript"));

    let (result, out) = run(parse(&["build-rmd", "--pkg", tmp.path().to_str().unwrap()]), &interp);

    assert!(result.is_ok());
    assert!(out.contains("up to date"));
}

#[test]
fn build_rmd_renders_stale_sources() {
    let tmp = TempDir::new().unwrap();
    let pkg = tmp.path().join("pkg");
    fs::create_dir_all(&pkg).unwrap();
    fs::write(pkg.join("README.Rmd"), "---\ntitle: readme\n---\n").unwrap();
    let interp = fake_rscript(0);

    let (result, out) = run(parse(&["build-rmd", "--pkg", pkg.to_str().unwrap()]), &interp);

    assert!(result.is_ok());
    assert!(out.contains(&format!(
        "devtools::build_rmd(c(\"{}\"), \"{}\")",
        pkg.join("README.Rmd").display(),
        pkg.display()
    )));
}
