//! Commands `rpoetry` adds on top of the shared `devtools` set.

/// License selection: `rpoetry license`.
///
/// Runs `usethis::use_gpl3_license()` or `usethis::use_mit_license()` with
/// the package root as the interpreter's working directory.
pub mod license;

/// Lockfile management: `rpoetry new`, `rpoetry add`, `rpoetry remove`.
///
/// Wraps `renv::init`, `renv::install`, `renv::update`, `renv::remove` and
/// `renv::snapshot`.
pub mod renv;
