//! Command-line and environment configuration for the server binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Search server over an XML user dataset
#[derive(Parser, Debug, Clone)]
#[command(name = "search-server")]
#[command(about = "HTTP search over an XML user dataset")]
pub struct Config {
    /// Listen address
    #[arg(long, default_value = "127.0.0.1:3000", env = "SEARCH_LISTEN")]
    pub listen: SocketAddr,

    /// Path to the XML dataset, re-read on every request
    #[arg(long, default_value = "dataset.xml", env = "SEARCH_DATASET")]
    pub dataset: PathBuf,

    /// Shared secret expected in the AccessToken header
    #[arg(long, env = "SEARCH_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,
}
