pub mod resolve;
pub mod servers;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DNS over HTTPS resolver that races multiple upstream servers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the configuration file
    #[arg(
        short,
        long,
        default_value = "/etc/dohfan/dohfan.toml",
        env = "CONFIG_PATH"
    )]
    config_path: PathBuf,
    #[command(subcommand)]
    inner: Commands,
}

impl Args {
    pub async fn run(self) {
        let config = crate::config::Config::load(&self.config_path);
        match self.inner {
            Commands::Resolve(inner) => inner.run(config).await,
            Commands::Servers(inner) => inner.run(config).await,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    Resolve(resolve::Command),
    Servers(servers::Command),
}
