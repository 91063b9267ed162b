use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "precommitr", version, about = "precommitR - the cli for devtools")]
pub struct Cli {
    /// Rscript executable to use (overrides PRECOMMITR_RSCRIPT)
    #[arg(long, global = true)]
    pub rscript: Option<String>,

    /// Log every interpreter line and failure at debug level
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an R package
    Create {
        /// Directory of the new package
        path: PathBuf,
    },
    /// Calls devtools::document()
    Document(PkgArgs),
    /// Calls devtools::check()
    Check(PkgArgs),
    /// Calls devtools::load_all()
    LoadAll(PkgArgs),
    /// Calls devtools::build_rmd() with the .Rmd files whose .md is missing or older
    BuildRmd(PkgArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PkgArgs {
    /// Package root
    #[arg(long, default_value = ".")]
    pub pkg: PathBuf,
}
