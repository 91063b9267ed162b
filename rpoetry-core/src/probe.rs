use crate::error::{Error, Result};
use crate::interpreter::Interpreter;

/// Check whether the R package `name` is installed.
///
/// Evaluates `packageVersion('<name>')` without echoing anything. Any failure
/// of the probe, including the interpreter itself being absent, means "not
/// installed".
pub fn is_installed(interpreter: &Interpreter, name: &str) -> bool {
    let expr = format!("packageVersion('{name}')");
    match interpreter.eval(expr).quiet(true).run(&mut std::io::sink()) {
        Ok(()) => {
            tracing::debug!(package = name, "capability present");
            true
        }
        Err(err) => {
            tracing::debug!(package = name, error = %err, "capability missing");
            false
        }
    }
}

/// Result of probing the required packages once, before dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityReport {
    missing: Vec<String>,
}

impl CapabilityReport {
    /// Probe every name in `required`, in order.
    pub fn probe(interpreter: &Interpreter, required: &[&str]) -> Self {
        let missing = required
            .iter()
            .filter(|name| !is_installed(interpreter, name))
            .map(|name| name.to_string())
            .collect();
        Self { missing }
    }

    /// A report in which everything was found.
    pub fn satisfied() -> Self {
        Self::default()
    }

    pub fn with_missing<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            missing: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }

    /// Fail with the first missing package, if any.
    pub fn ensure(&self) -> Result<()> {
        match self.missing.first() {
            Some(name) => Err(Error::CapabilityMissing(name.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn failing_interpreter_means_not_installed() {
        let interp = Interpreter::new("sh").with_leading_args(["-c", "exit 1", "fake-rscript"]);
        assert!(!is_installed(&interp, "nonexistent-package-xyz"));
    }

    #[test]
    fn successful_probe_is_installed() {
        let interp = Interpreter::new("true");
        assert!(is_installed(&interp, "anything"));
    }

    #[test]
    fn absent_interpreter_is_not_installed() {
        let interp = Interpreter::new("no-such-rscript-binary");
        assert!(!is_installed(&interp, "devtools"));
    }

    #[test]
    fn report_lists_missing_in_order() {
        let report = CapabilityReport::probe(&Interpreter::new("false"), &["devtools", "renv"]);
        assert_eq!(report.missing(), &["devtools".to_string(), "renv".to_string()]);
        let err = report.ensure().unwrap_err();
        assert_eq!(err.to_string(), "devtools is not installed.");
    }

    #[test]
    fn satisfied_report_passes() {
        let report = CapabilityReport::probe(&Interpreter::new("true"), &["devtools"]);
        assert!(report.is_satisfied());
        assert!(report.ensure().is_ok());
    }

    #[test]
    #[ignore = "requires Rscript on PATH"]
    fn base_package_is_installed() {
        assert!(is_installed(&Interpreter::default(), "base"));
    }

    #[test]
    #[ignore = "requires Rscript on PATH"]
    fn unknown_package_is_not_installed() {
        assert!(!is_installed(&Interpreter::default(), "nonexistent-package-xyz"));
    }
}
