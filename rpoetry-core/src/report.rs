//! How a failed command is presented to the user.

use std::io::{self, Write};

use colored::Colorize;

use crate::error::Error;

/// Write the user-facing message for `err`.
///
/// An execution failure prints nothing, since the interpreter's own output is
/// already on screen. A missing package goes to `out`. Anything else is shown
/// as a red `Error: ...` line on `err_out`.
pub fn report(err: &Error, out: &mut dyn Write, err_out: &mut dyn Write) -> io::Result<()> {
    match err {
        Error::Execution { .. } => Ok(()),
        Error::CapabilityMissing(_) => writeln!(out, "{err}"),
        _ => writeln!(err_out, "{}", format!("Error: {err}").red()),
    }
}
