use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use fc_domain::config::ServerConfig;
use fc_figma::RestFigmaClient;
use fc_server::cli::{Cli, Command, ConfigCommand};
use fc_server::tools::ChunkedNodesArgs;
use fc_server::McpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Default to serve when no subcommand is given.
        None | Some(Command::Serve) => {
            let (config, config_path) = fc_server::cli::load_config()?;
            init_tracing(&config.server);

            tracing::info!(
                config_path = %config_path,
                base_url = %config.figma.base_url,
                page_size = config.traversal.page_size,
                budget = config.traversal.effective_budget(),
                "figchunk starting"
            );
            for issue in config.validate() {
                tracing::warn!(%issue, "configuration issue");
            }

            let client = RestFigmaClient::new(&config.figma).context("creating Figma client")?;
            let server = McpServer::new(client, &config);
            server
                .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await?;
            Ok(())
        }
        Some(Command::Read {
            file_key,
            cursor,
            page_size,
            max_depth,
            node_types,
            summarize,
        }) => {
            let (config, _) = fc_server::cli::load_config()?;
            init_tracing(&config.server);
            let args = ChunkedNodesArgs {
                file_key,
                cursor,
                page_size,
                max_depth,
                node_types: (!node_types.is_empty()).then_some(node_types),
                summarize_nodes: summarize.then_some(true),
                ..Default::default()
            };
            fc_server::cli::read::run(&config, args).await
        }
        Some(Command::Config(ConfigCommand::Validate)) => {
            let (config, config_path) = fc_server::cli::load_config()?;
            if !fc_server::cli::config::validate(&config, &config_path) {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Command::Config(ConfigCommand::Show)) => {
            let (config, _) = fc_server::cli::load_config()?;
            fc_server::cli::config::show(&config)
        }
        Some(Command::Version) => {
            println!("figchunk {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Structured JSON logs on stderr; stdout carries the protocol.
fn init_tracing(server: &ServerConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .json()
        .init();
}
