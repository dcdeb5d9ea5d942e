pub mod config;
pub mod read;

use clap::{Parser, Subcommand};

/// figchunk — page through large Figma files within a size budget.
#[derive(Debug, Parser)]
#[command(name = "figchunk", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve MCP over stdin/stdout (default when no subcommand is given).
    Serve,
    /// Read one page of a file and print it as JSON.
    Read {
        /// Key of the Figma file.
        file_key: String,
        /// Resume token printed by a previous read.
        #[arg(long)]
        cursor: Option<String>,
        /// Maximum nodes in the page.
        #[arg(long)]
        page_size: Option<i64>,
        /// Deepest level to admit (top-level pages are depth 0).
        #[arg(long)]
        max_depth: Option<i64>,
        /// Only admit these node types (repeatable).
        #[arg(long = "node-type")]
        node_types: Vec<String>,
        /// Reduce nodes to their minimal shape.
        #[arg(long)]
        summarize: bool,
    },
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Validate the config file and report issues.
    Validate,
    /// Print the resolved config (defaults filled in) as TOML.
    Show,
}

/// Load config from `FIGCHUNK_CONFIG` (default `figchunk.toml`), or defaults
/// when the file does not exist.
pub fn load_config() -> anyhow::Result<(fc_domain::config::Config, String)> {
    let config_path =
        std::env::var("FIGCHUNK_CONFIG").unwrap_or_else(|_| "figchunk.toml".into());
    let config = fc_domain::config::Config::load_or_default(&config_path)
        .map_err(|e| anyhow::anyhow!("loading {config_path}: {e}"))?;
    Ok((config, config_path))
}
