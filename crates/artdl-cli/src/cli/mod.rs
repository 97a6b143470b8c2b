//! CLI for artdl. Running with no arguments downloads the artifact described
//! by the user config file.

use anyhow::Result;
use artdl_core::config::{self, DownloaderConfig};
use artdl_core::{fetcher, CurlTransport, TracingReporter};
use clap::Parser;
use std::path::PathBuf;

/// One-shot artifact download from a Maven-layout repository.
#[derive(Debug, Parser)]
#[command(name = "artdl")]
#[command(about = "Download one artifact (release or snapshot) from a Maven-layout repository", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/artdl/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        // Download failures are reported through the log, not as an exit code.
        let transport = CurlTransport::default();
        if let Some(result) = fetcher::run(&cfg, &transport, &TracingReporter) {
            println!("{}", result.path.display());
        }
        Ok(())
    }

    fn load_config(&self) -> Result<DownloaderConfig> {
        match &self.config {
            Some(path) => config::load_from(path),
            None => config::load_or_init(),
        }
    }
}
