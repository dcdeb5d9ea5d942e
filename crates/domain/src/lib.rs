//! `fc-domain` — shared types for figchunk.
//!
//! The node tree model, traversal and application config, the error type
//! every crate returns, and the structured trace events.

pub mod config;
pub mod error;
pub mod node;
pub mod trace;
