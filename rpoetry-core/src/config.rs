use crate::interpreter::{Interpreter, DEFAULT_RSCRIPT};

/// Toolchain settings resolved before any command runs.
///
/// Resolution order (lowest to highest priority):
/// 1. built-in defaults (`Rscript`, probing enabled)
/// 2. `<PREFIX>_RSCRIPT` / `<PREFIX>_SKIP_PROBE` environment variables
/// 3. command-line overrides applied with [`ToolchainConfig::with_rscript`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
    pub rscript: String,
    pub skip_probe: bool,
    pub debug: bool,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            rscript: DEFAULT_RSCRIPT.to_string(),
            skip_probe: false,
            debug: false,
        }
    }
}

impl ToolchainConfig {
    /// Read overrides from the process environment, e.g. `RPOETRY_RSCRIPT`.
    pub fn from_env(prefix: &str) -> Self {
        Self::from_lookup(prefix, |key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(rscript) = lookup(&format!("{prefix}_RSCRIPT")).filter(|v| !v.is_empty()) {
            config.rscript = rscript;
        }
        if let Some(skip) = lookup(&format!("{prefix}_SKIP_PROBE")) {
            config.skip_probe = parse_flag(&skip);
        }
        config
    }

    pub fn with_rscript(mut self, rscript: Option<String>) -> Self {
        if let Some(rscript) = rscript {
            self.rscript = rscript;
        }
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug |= debug;
        self
    }

    pub fn interpreter(&self) -> Interpreter {
        Interpreter::new(&self.rscript)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
