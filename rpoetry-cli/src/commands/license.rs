use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use rpoetry_core::{devtools, Interpreter, Result};

/// License templates offered by `usethis`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum License {
    #[default]
    Gpl3,
    Mit,
}

impl License {
    pub fn expr(self) -> &'static str {
        match self {
            License::Gpl3 => "usethis::use_gpl3_license()",
            License::Mit => "usethis::use_mit_license()",
        }
    }
}

/// Apply `license` to the package at `pkg`.
///
/// usethis acts on the active project, so the interpreter is started with
/// `pkg` as its working directory.
pub fn run(interpreter: &Interpreter, license: License, pkg: &Path, out: &mut dyn Write) -> Result<()> {
    let pkg = devtools::resolve(pkg)?;
    interpreter.eval(license.expr()).current_dir(pkg).run(out)
}
