use anyhow::Result;
use clap::Parser;
use dumbgit::{Config, DumbGitServer};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dumbgit")]
#[command(about = "Static file server that speaks the dumb git HTTP protocol", long_about = None)]
struct Cli {
    /// Directory to serve (defaults to the working directory)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// The port that the server will listen to
    #[arg(long)]
    port: Option<u16>,

    /// The ip that the server will listen to
    #[arg(long)]
    host: Option<String>,

    /// Enable request logging on stdout
    #[arg(long)]
    verbose: bool,

    /// TOML config file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(dir) = self.dir {
            config.dir = dir;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if self.verbose {
            config.verbose = true;
        }

        config.absolutize()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;

    // Without a subscriber every record is dropped
    if config.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stdout)
            .init();
    }

    tracing::debug!(dir = %config.dir.display(), "serving directory");

    DumbGitServer::new(config).run().await
}
