use std::process::ExitCode;

use clap::Parser;
use jiff::Zoned;
use privatbank_rates::{Cli, run};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    run(&args, &args.client(), Zoned::now().date(), &mut std::io::stdout().lock())
}
