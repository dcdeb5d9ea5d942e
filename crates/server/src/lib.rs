//! `fc-server` — MCP tool server exposing chunked Figma node reads over stdio.

pub mod cli;
pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
