//! Keeps an editor document's blocks in sync with an external block store.
//!
//! Flow: tree change → [`extract_blocks`] (parses each block for card syntax)
//! → diff against the last snapshot → staged changes → debounced flush to a
//! [`BlockSink`].

pub mod block;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod node;
pub mod sink;

pub use block::{extract_blocks, BlockData};
pub use config::SyncConfig;
pub use debounce::DebouncedSync;
pub use engine::{BlockSync, ChangeOutcome, SyncStatus};
pub use error::{Result, SyncError};
pub use node::{Node, Visit};
pub use sink::{BlockSink, SinkError, SinkResult};
