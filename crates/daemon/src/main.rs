//! Filedock Daemon
//!
//! Remote file-management service scoped to a root directory.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use daemon::config::Config;
use daemon::files::FileEngine;

/// Filedock Daemon - remote file-management service scoped to a root directory.
#[derive(Parser, Debug)]
#[command(name = "filedock")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root directory to serve (overrides config)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Address to listen on (overrides config)
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    config.apply_env_overrides();

    if let Some(root) = cli.root {
        config.files.root = root;
    }
    if let Some(listen) = cli.listen {
        config.server.listen_addr = listen;
    }

    // Initialize tracing
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        config.daemon.log_level.clone()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    config.validate()?;

    std::fs::create_dir_all(&config.files.root).with_context(|| {
        format!(
            "Failed to create root directory: {}",
            config.files.root.display()
        )
    })?;
    // Canonical root keeps resolution stable when the configured path
    // contains symlinked segments.
    let root = std::fs::canonicalize(&config.files.root).with_context(|| {
        format!(
            "Failed to canonicalize root directory: {}",
            config.files.root.display()
        )
    })?;

    let addr = config
        .server
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.server.listen_addr))?;

    tracing::info!(root = %root.display(), %addr, "Filedock daemon starting...");

    let engine = FileEngine::new(root);
    daemon::server::serve(engine, addr).await
}
