pub mod alias;
pub mod load;
pub mod resolve;

use std::path::PathBuf;
use std::process;

use clap::Args;
use tracing_subscriber::EnvFilter;

use npm_use::{Importer, UseConfig, UseError};

/// Options shared by every subcommand.
#[derive(Args)]
pub struct GlobalArgs {
    /// Log each pipeline step to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Configuration file (default: npm-use.toml in this or a parent directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Installer program
    #[arg(long, global = true)]
    pub npm: Option<String>,
    /// Node program used to import modules
    #[arg(long, global = true)]
    pub node: Option<String>,
    /// Global install root (skips `npm root -g`)
    #[arg(long, global = true)]
    pub global_root: Option<PathBuf>,
}

/// Log to stderr, filtered by `RUST_LOG` when set.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "npm_use=debug" } else { "npm_use=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Configuration from file and environment, with command-line overrides.
pub fn load_config(global: &GlobalArgs) -> UseConfig {
    let loaded = match &global.config {
        Some(path) => UseConfig::load(path),
        None => UseConfig::discover(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    if let Some(npm) = &global.npm {
        config.npm = npm.clone();
    }
    if let Some(node) = &global.node {
        config.node = node.clone();
    }
    if let Some(root) = &global.global_root {
        config.global_root = Some(root.clone());
    }
    config
}

pub fn importer(global: &GlobalArgs) -> Importer {
    Importer::new(&load_config(global))
}

/// Report `err` and exit with status 1.
pub fn fail(err: &UseError) -> ! {
    npm_use::diagnostic::render_error(err);
    process::exit(1);
}
