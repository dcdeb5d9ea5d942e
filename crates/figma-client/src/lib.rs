//! `fc-figma` — Figma REST implementation of
//! [`DocumentSource`](fc_traversal::DocumentSource).
//!
//! ```rust,no_run
//! use fc_domain::config::FigmaConfig;
//! use fc_figma::RestFigmaClient;
//! use fc_traversal::ChunkedReader;
//!
//! # async fn example() -> fc_domain::error::Result<()> {
//! let client = RestFigmaClient::new(&FigmaConfig::default())?;
//! let reader = ChunkedReader::new(client);
//! let page = reader.read("FILE_KEY", None, &Default::default()).await?;
//! println!("{} nodes, more: {}", page.nodes.len(), page.has_more);
//! # Ok(())
//! # }
//! ```

pub mod rest;

pub use rest::RestFigmaClient;
