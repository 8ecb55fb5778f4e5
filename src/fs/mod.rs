//! File System Module
//!
//! The in-memory file tree: nodes, path resolution, aliasing and the
//! operations façade driven by the command layer.

pub mod alias;
pub mod in_memory_fs;
pub mod node;
pub mod tree;
pub mod types;

pub use alias::Reference;
pub use in_memory_fs::InMemoryFs;
pub use node::{Directory, Node, NodeId, TextFile};
pub use tree::{Cursor, Step, Tree};
pub use types::*;
