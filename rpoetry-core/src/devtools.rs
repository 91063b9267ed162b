//! `devtools::*` operations shared by both tool families.
//!
//! Each operation has a pure `*_expr` builder returning the R source that
//! gets evaluated, and a runner that resolves paths and streams the result.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::interpreter::Interpreter;
use crate::rexpr::{path_vector, posix_path, string_literal};
use crate::stale::StaleFileSelector;

/// Make `path` absolute against the current directory without touching disk.
pub fn resolve(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| Error::Filesystem {
        path: path.to_path_buf(),
        source,
    })
}

fn call(function: &str, pkg: &Path) -> String {
    format!("devtools::{function}({})", string_literal(posix_path(pkg)))
}

pub fn create_expr(path: &Path) -> String {
    call("create", path)
}

pub fn document_expr(pkg: &Path) -> String {
    call("document", pkg)
}

pub fn check_expr(pkg: &Path) -> String {
    call("check", pkg)
}

pub fn load_all_expr(pkg: &Path) -> String {
    call("load_all", pkg)
}

pub fn test_expr(pkg: &Path) -> String {
    call("test", pkg)
}

pub fn install_expr(pkg: &Path) -> String {
    call("install", pkg)
}

pub fn build_expr(pkg: &Path) -> String {
    call("build", pkg)
}

pub fn build_rmd_expr<P: AsRef<Path>>(files: &[P], pkg: &Path) -> String {
    format!(
        "devtools::build_rmd({}, {})",
        path_vector(files),
        string_literal(posix_path(pkg))
    )
}

fn run_on(
    interpreter: &Interpreter,
    build: fn(&Path) -> String,
    path: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    let path = resolve(path)?;
    interpreter.eval(build(&path)).run(out)
}

/// Create a package skeleton at `path`.
pub fn create(interpreter: &Interpreter, path: &Path, out: &mut dyn Write) -> Result<()> {
    run_on(interpreter, create_expr, path, out)
}

pub fn document(interpreter: &Interpreter, pkg: &Path, out: &mut dyn Write) -> Result<()> {
    run_on(interpreter, document_expr, pkg, out)
}

pub fn check(interpreter: &Interpreter, pkg: &Path, out: &mut dyn Write) -> Result<()> {
    run_on(interpreter, check_expr, pkg, out)
}

pub fn load_all(interpreter: &Interpreter, pkg: &Path, out: &mut dyn Write) -> Result<()> {
    run_on(interpreter, load_all_expr, pkg, out)
}

pub fn test(interpreter: &Interpreter, pkg: &Path, out: &mut dyn Write) -> Result<()> {
    run_on(interpreter, test_expr, pkg, out)
}

pub fn install(interpreter: &Interpreter, pkg: &Path, out: &mut dyn Write) -> Result<()> {
    run_on(interpreter, install_expr, pkg, out)
}

pub fn build(interpreter: &Interpreter, pkg: &Path, out: &mut dyn Write) -> Result<()> {
    run_on(interpreter, build_expr, pkg, out)
}

/// Re-render every stale `.Rmd` under `pkg`.
///
/// Returns the number of documents handed to `devtools::build_rmd`. When
/// nothing is stale the interpreter is not started and `0` is returned.
pub fn build_rmd(interpreter: &Interpreter, pkg: &Path, out: &mut dyn Write) -> Result<usize> {
    let pkg = resolve(pkg)?;
    let stale = StaleFileSelector::rmarkdown().select(&pkg)?;
    if stale.is_empty() {
        tracing::debug!(pkg = %pkg.display(), "no stale R Markdown sources");
        return Ok(0);
    }
    tracing::debug!(count = stale.len(), "rebuilding stale R Markdown sources");
    interpreter.eval(build_rmd_expr(&stale, &pkg)).run(out)?;
    Ok(stale.len())
}
