// CLI module for recipebox
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;

/// recipebox - Document-backed recipe storage behind a small JSON HTTP API
#[derive(Parser, Debug, Default)]
#[command(name = "recipebox", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.recipebox/config.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Document store connection string (memory:// or file:///path/recipes.json)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply CLI overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
