use clap::Parser;
use statescope::{
    Cli, Command,
    handlers::{handle_list, handle_report, handle_show},
};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    match &cli.command {
        Command::Report {
            project,
            fail_on,
            no_save,
        } => handle_report(&cli, project, *fail_on, *no_save),
        Command::Show { project } => handle_show(&cli, project),
        Command::List => handle_list(&cli),
    }
}

/// Initialize tracing/logging based on CLI flags.
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}
