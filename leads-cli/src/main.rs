use clap::Parser;
use leads_cli::cli::Cli;
use leads_cli::commands;
use leads_cli::context::CliContext;
use leads_cli::error::{handle_cli_result, CliResult};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    let exit_code = handle_cli_result(run(&cli).await);
    process::exit(exit_code);
}

async fn run(cli: &Cli) -> CliResult<i32> {
    let ctx = CliContext::new(cli).await?;
    let mut stdout = std::io::stdout();
    commands::execute(cli, &ctx, &mut stdout).await
}

fn configure_logging(verbose: bool, debug: bool, quiet: bool) {
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

    let log_level = if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    registry()
        .with(EnvFilter::new(format!("hyper=warn,reqwest=warn,{log_level}")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
