mod cmd;
mod config;
mod error;
mod model;

use clap::Parser;
use config::{Cli, Commands};

fn main() {
    // generated source goes to stdout, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Scaffold(args) => cmd::scaffold::run(&args),
        Commands::Keys(args) => cmd::keys::run(&args),
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
