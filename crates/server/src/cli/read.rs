use anyhow::Context;
use fc_domain::config::Config;
use fc_figma::RestFigmaClient;
use fc_traversal::ChunkedReader;

use crate::tools::ChunkedNodesArgs;

/// One-shot read: fetch a page and print the result as pretty JSON.
pub async fn run(config: &Config, args: ChunkedNodesArgs) -> anyhow::Result<()> {
    let traversal = args.to_config(&config.traversal)?;
    let client = RestFigmaClient::new(&config.figma).context("creating Figma client")?;
    let reader = ChunkedReader::new(client);

    let page = reader
        .read(&args.file_key, args.cursor.as_deref(), &traversal)
        .await
        .with_context(|| format!("reading file {}", args.file_key))?;

    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
