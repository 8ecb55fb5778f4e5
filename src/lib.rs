//! memfs - an in-memory hierarchical file system
//!
//! Directories and text files live in an arena addressed by `NodeId`. Several
//! directory entries may name the same node (`link`), and a node is reclaimed
//! once no entry refers to it. A small line interpreter drives the file system
//! through a registry of commands.

pub mod commands;
pub mod config;
pub mod fs;
pub mod logging;
pub mod parser;
pub mod shell;

pub use commands::{create_default_registry, Command, CommandRegistry, CommandResult};
pub use fs::{FileSystem, FsError, InMemoryFs};
pub use shell::{LineOutcome, Shell, ShellOptions};
