//! `fc-traversal` — bounded, resumable enumeration of a node tree.
//!
//! A [`TraversalSession`] walks a [`Document`](fc_domain::node::Document)
//! in pre-order, asks the admission filter about every node, and stops when
//! the page is full or the size budget is spent, handing back a cursor that
//! resumes the walk on the next call.
//!
//! ```rust,ignore
//! let mut session = TraversalSession::new();
//! let page = session.traverse(&document, None, &config)?;
//! if let Some(cursor) = page.next_cursor.as_deref() {
//!     let next = session.traverse(&document, Some(cursor), &config)?;
//! }
//! ```

pub mod admission;
pub mod cursor;
pub mod engine;
pub mod reader;
pub mod report;
pub mod session;
pub mod size;
pub mod source;
pub mod summarize;

pub use cursor::Cursor;
pub use reader::ChunkedReader;
pub use report::{HaltReason, TraversalResult, TraversalStats};
pub use session::TraversalSession;
pub use source::{DocumentSource, InMemorySource};
