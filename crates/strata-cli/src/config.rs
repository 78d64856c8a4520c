use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strata_config_build::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "strata", about = "Strata model scaffolding tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a context module from a JSON model file
    Scaffold(ScaffoldArgs),

    /// Print the key factory resolved for every entity key
    Keys(KeysArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ScaffoldArgs {
    /// Path to the TOML config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, env = "STRATA_CONFIG")]
    pub config: PathBuf,

    /// Path to the JSON model file
    #[arg(long)]
    pub model: PathBuf,

    /// Output file; stdout when omitted
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct KeysArgs {
    /// Path to the JSON model file
    #[arg(long)]
    pub model: PathBuf,
}
