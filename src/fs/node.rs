//! Tree Nodes
//!
//! A node is either a directory or a text file. Directories refer to their
//! children by [`NodeId`], so the same node can sit behind several entries.

use std::collections::BTreeMap;
use std::fmt;

/// Stable handle of a node inside a [`Tree`](super::tree::Tree) arena.
///
/// Two entries designate the same node exactly when their ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A directory: named children kept in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    pub name: String,
    pub children: BTreeMap<String, NodeId>,
}

impl Directory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: BTreeMap::new(),
        }
    }

    /// Shallow weight: the length of every child name plus one per child.
    pub fn size(&self) -> usize {
        self.children
            .keys()
            .map(|name| name.chars().count() + 1)
            .sum()
    }
}

/// A text file and its content buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFile {
    pub name: String,
    pub content: String,
}

impl TextFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: String::new(),
        }
    }

    pub fn append(&mut self, text: &str) {
        self.content.push_str(text);
    }

    /// Content length in characters.
    pub fn size(&self) -> usize {
        self.content.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Directory(Directory),
    TextFile(TextFile),
}

impl Node {
    pub fn directory(name: impl Into<String>) -> Self {
        Node::Directory(Directory::new(name))
    }

    pub fn text_file(name: impl Into<String>) -> Self {
        Node::TextFile(TextFile::new(name))
    }

    /// Name of the entry this node was created or last moved under.
    pub fn name(&self) -> &str {
        match self {
            Node::Directory(dir) => &dir.name,
            Node::TextFile(file) => &file.name,
        }
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        match self {
            Node::Directory(dir) => dir.name = name.to_string(),
            Node::TextFile(file) => file.name = name.to_string(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    pub fn size(&self) -> usize {
        match self {
            Node::Directory(dir) => dir.size(),
            Node::TextFile(file) => file.size(),
        }
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            Node::Directory(dir) => Some(dir),
            Node::TextFile(_) => None,
        }
    }
}
