//! File System Types
//!
//! Errors, listing records and the operation trait shared by every backend.

use std::fmt;
use thiserror::Error;

/// File system errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("ENOENT: no such file or directory, {operation} '{path}'")]
    NotFound { path: String, operation: String },

    #[error("EEXIST: file already exists, {operation} '{path}'")]
    AlreadyExists { path: String, operation: String },

    /// A file-only operation was applied to a directory.
    #[error("EISDIR: illegal operation on a directory, {operation} '{path}'")]
    IsDirectory { path: String, operation: String },

    #[error("ENOTDIR: not a directory, {operation} '{path}'")]
    NotDirectory { path: String, operation: String },

    /// The working directory (or one above it) is in the way.
    #[error("EBUSY: resource busy or locked, {operation} '{path}'")]
    Busy { path: String, operation: String },

    /// The path names no entry, e.g. `/` where a leaf is required.
    #[error("EINVAL: invalid argument, {operation} '{path}'")]
    InvalidName { path: String, operation: String },
}

impl FsError {
    /// The path the failing operation was given.
    pub fn path(&self) -> &str {
        match self {
            FsError::NotFound { path, .. }
            | FsError::AlreadyExists { path, .. }
            | FsError::IsDirectory { path, .. }
            | FsError::NotDirectory { path, .. }
            | FsError::Busy { path, .. }
            | FsError::InvalidName { path, .. } => path,
        }
    }

    /// Short human readable reason, in the style of coreutils diagnostics.
    pub fn reason(&self) -> &'static str {
        match self {
            FsError::NotFound { .. } => "No such file or directory",
            FsError::AlreadyExists { .. } => "File exists",
            FsError::IsDirectory { .. } => "Is a directory",
            FsError::NotDirectory { .. } => "Not a directory",
            FsError::Busy { .. } => "Device or resource busy",
            FsError::InvalidName { .. } => "Invalid argument",
        }
    }
}

/// Kind marker shown in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    TextFile,
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub kind: EntryKind,
    pub size: usize,
}

/// Report of the working directory's direct children.
///
/// `Display` renders the fixed-width listing format:
///
/// ```text
///
/// === /docs/ ===
/// notes                  d          6
/// readme                          12
///
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Absolute path of the listed directory (`/` for the root).
    pub path: String,
    /// Entries sorted by name.
    pub entries: Vec<ListingEntry>,
}

impl Listing {
    fn header_path(&self) -> String {
        if self.path == "/" {
            "/".to_string()
        } else {
            format!("{}/", self.path)
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "=== {} ===", self.header_path())?;
        for entry in &self.entries {
            let marker = match entry.kind {
                EntryKind::Directory => "d ",
                EntryKind::TextFile => "  ",
            };
            writeln!(f, "{:<21}{}{:>10}", entry.name, marker, entry.size)?;
        }
        writeln!(f)
    }
}

/// Operations the command layer drives.
///
/// Paths are `/`-separated; a leading `/` starts at the root, anything else
/// starts at the working directory.
pub trait FileSystem {
    /// Make the root the working directory.
    fn home(&mut self);

    /// Make the directory at `path` the working directory.
    fn enter(&mut self, path: &str) -> Result<(), FsError>;

    /// Create an empty text file.
    fn create_file(&mut self, path: &str) -> Result<(), FsError>;

    /// Create an empty directory. Parents are never created implicitly.
    fn create_dir(&mut self, path: &str) -> Result<(), FsError>;

    /// Remove the single entry at `path`.
    fn delete(&mut self, path: &str) -> Result<(), FsError>;

    /// Remove every entry that refers to the node at `path`.
    ///
    /// Returns the number of entries removed.
    fn delete_all(&mut self, path: &str) -> Result<usize, FsError>;

    /// Append `text` to the text file at `path`.
    fn append(&mut self, text: &str, path: &str) -> Result<(), FsError>;

    /// Content of the text file at `path`.
    fn show(&self, path: &str) -> Result<String, FsError>;

    /// Listing of the working directory.
    fn list(&self) -> Listing;

    /// Relocate the entry at `src` to `dest`, keeping the node's identity.
    fn mv(&mut self, src: &str, dest: &str) -> Result<(), FsError>;

    /// Add an entry at `link_path` referring to the node at `orig_path`.
    fn link(&mut self, link_path: &str, orig_path: &str) -> Result<(), FsError>;

    /// Absolute path of the working directory.
    fn pwd(&self) -> String;
}

// ============================================================================
// Tests
// ============================================================================
