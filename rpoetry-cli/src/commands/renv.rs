//! Dependency management through `renv` and its `renv.lock` lockfile.
//!
//! Every operation is a single interpreter invocation; multi-step work is
//! joined into one expression with `; `.

use std::io::Write;
use std::path::Path;

use rpoetry_core::rexpr::{character_vector, posix_path, string_literal};
use rpoetry_core::{devtools, Interpreter, Result};

use super::license::License;

const SNAPSHOT: &str = "renv::snapshot(prompt = FALSE)";

/// Create a package at `path` and initialise a lockfile environment in it.
pub fn new_expr(path: &Path) -> String {
    let path = string_literal(posix_path(path));
    format!("devtools::create({path}); renv::init(project = {path}, restart = FALSE)")
}

/// What `rpoetry add` should do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddRequest {
    pub packages: Vec<String>,
    pub upgrade: bool,
    pub license: Option<License>,
}

/// `None` when the request has nothing to do.
pub fn add_expr(request: &AddRequest) -> Option<String> {
    let mut steps = Vec::new();
    match (request.packages.is_empty(), request.upgrade) {
        (false, false) => steps.push(format!(
            "renv::install({})",
            character_vector(&request.packages)
        )),
        (false, true) => steps.push(format!(
            "renv::update({})",
            character_vector(&request.packages)
        )),
        (true, true) => steps.push("renv::update()".to_string()),
        (true, false) => {}
    }
    if !steps.is_empty() {
        steps.push(SNAPSHOT.to_string());
    }
    if let Some(license) = request.license {
        steps.push(license.expr().to_string());
    }

    if steps.is_empty() {
        None
    } else {
        Some(steps.join("; "))
    }
}

pub fn remove_expr(packages: &[String]) -> String {
    format!("renv::remove({}); {SNAPSHOT}", character_vector(packages))
}

pub fn new(interpreter: &Interpreter, path: &Path, out: &mut dyn Write) -> Result<()> {
    let path = devtools::resolve(path)?;
    interpreter.eval(new_expr(&path)).run(out)
}

/// Returns `false` when there was nothing to do and no interpreter was started.
pub fn add(
    interpreter: &Interpreter,
    request: &AddRequest,
    pkg: &Path,
    out: &mut dyn Write,
) -> Result<bool> {
    let Some(expr) = add_expr(request) else {
        return Ok(false);
    };
    let pkg = devtools::resolve(pkg)?;
    tracing::debug!(packages = ?request.packages, upgrade = request.upgrade, "updating lockfile");
    interpreter.eval(expr).current_dir(pkg).run(out)?;
    Ok(true)
}

pub fn remove(
    interpreter: &Interpreter,
    packages: &[String],
    pkg: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    let pkg = devtools::resolve(pkg)?;
    interpreter.eval(remove_expr(packages)).current_dir(pkg).run(out)
}
