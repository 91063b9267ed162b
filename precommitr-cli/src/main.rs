use clap::Parser;
use precommitr_cli::cli::Cli;
use precommitr_cli::{ENV_PREFIX, REQUIRED};
use rpoetry_core::{logging, report, CapabilityReport, ToolchainConfig};

fn main() {
    let cli = Cli::parse();

    let config = ToolchainConfig::from_env(ENV_PREFIX)
        .with_rscript(cli.rscript.clone())
        .with_debug(cli.debug);
    logging::init_tracing(config.debug);
    tracing::debug!(?config, "resolved toolchain config");

    let interpreter = config.interpreter();
    let capabilities = if config.skip_probe {
        CapabilityReport::satisfied()
    } else {
        CapabilityReport::probe(&interpreter, REQUIRED)
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = precommitr_cli::run(cli.command, &interpreter, &capabilities, &mut stdout) {
        let _ = report::report(&e, &mut stdout, &mut std::io::stderr());
        std::process::exit(e.exit_code());
    }
}
