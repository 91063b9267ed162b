use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::license::License;

#[derive(Parser, Debug)]
#[command(name = "rpoetry", version, about = "rpoetry - the cli for devtools")]
pub struct Cli {
    /// Rscript executable to use (overrides RPOETRY_RSCRIPT)
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
    /// Select a license for the package
    License {
        #[arg(long, value_enum, default_value_t = License::Gpl3)]
        license: License,
        #[command(flatten)]
        pkg: PkgArgs,
    },
    /// Create an R package with an renv lockfile environment
    New {
        /// Directory of the new package
        path: PathBuf,
    },
    /// Install or upgrade dependencies and record them in renv.lock
    Add {
        /// Packages to install
        #[arg(long, num_args = 1..)]
        packages: Vec<String>,
        /// Upgrade instead of install (all packages when none are named)
        #[arg(long)]
        upgrade: bool,
        /// Also apply a license
        #[arg(long, value_enum)]
        license: Option<License>,
        #[command(flatten)]
        pkg: PkgArgs,
    },
    /// Remove dependencies and record the change in renv.lock
    Remove {
        /// Packages to remove
        #[arg(required = true)]
        packages: Vec<String>,
        #[command(flatten)]
        pkg: PkgArgs,
    },
    /// Calls devtools::test()
    Test(PkgArgs),
    /// Calls devtools::install()
    Install(PkgArgs),
    /// Calls devtools::build()
    Build(PkgArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PkgArgs {
    /// Package root
    #[arg(long, default_value = ".")]
    pub pkg: PathBuf,
}
