//! In-Memory File System Implementation
//!
//! The session object behind every command: one [`Tree`] plus the operations
//! the interpreter exposes.

use tracing::info;

use super::node::{Node, NodeId};
use super::tree::{Cursor, Tree};
use super::types::*;

/// In-memory virtual file system.
#[derive(Debug, Default)]
pub struct InMemoryFs {
    tree: Tree,
}

impl InMemoryFs {
    /// Create a new file system holding only the root directory.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Refuse to remove `target` while the working directory depends on it.
    fn ensure_not_in_use(&self, target: NodeId, path: &str, operation: &str) -> Result<(), FsError> {
        if self.tree.pwd().contains(target) {
            return Err(FsError::Busy {
                path: path.to_string(),
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    fn create(&mut self, path: &str, node: impl FnOnce(&str) -> Node, operation: &str) -> Result<(), FsError> {
        let (parent, leaf) = self.tree.resolve_parent(path, operation)?;
        self.tree.insert_new(&parent, &leaf, node(&leaf), operation)?;
        Ok(())
    }

    fn move_entry(&mut self, source: Cursor, src: &str, dest: &str) -> Result<(), FsError> {
        let node = source.node();
        let (from, old_name) = match source.split_last() {
            Some((from, name)) => (from, name.to_string()),
            None => {
                return Err(FsError::InvalidName {
                    path: src.to_string(),
                    operation: "move".to_string(),
                })
            }
        };
        let (to, new_name) = self.tree.resolve_parent(dest, "move")?;
        // Refuse only when the destination hangs below the entry being moved.
        if to.last_step_through(from.node(), &old_name).is_some() {
            return Err(FsError::Busy {
                path: dest.to_string(),
                operation: "move".to_string(),
            });
        }

        // Link first so the node never drops to zero links in between.
        self.tree.insert_child(&to, &new_name, node, "move")?;
        self.tree.remove_child(&from, &old_name, "move")?;
        if let Some(moved) = self.tree.get_mut(node) {
            moved.set_name(&new_name);
        }
        self.tree.relocate_pwd(&from, &old_name, &to, &new_name);
        Ok(())
    }
}

impl FileSystem for InMemoryFs {
    fn home(&mut self) {
        info!("returning home");
        let root = self.tree.root_cursor();
        self.tree.set_pwd(root);
    }

    fn enter(&mut self, path: &str) -> Result<(), FsError> {
        info!(path, "entering");
        let cursor = self.tree.resolve(path, "enter")?;
        match self.tree.get(cursor.node()) {
            Some(Node::Directory(_)) => {
                self.tree.set_pwd(cursor);
                Ok(())
            }
            _ => Err(FsError::NotDirectory {
                path: path.to_string(),
                operation: "enter".to_string(),
            }),
        }
    }

    fn create_file(&mut self, path: &str) -> Result<(), FsError> {
        info!(path, "creating file");
        self.create(path, |name| Node::text_file(name), "create")
    }

    fn create_dir(&mut self, path: &str) -> Result<(), FsError> {
        info!(path, "creating directory");
        self.create(path, |name| Node::directory(name), "mkdir")
    }

    fn delete(&mut self, path: &str) -> Result<(), FsError> {
        info!(path, "deleting");
        let (parent, leaf) = self.tree.resolve_parent(path, "delete")?;
        let target = self.tree.child(&parent, &leaf).ok_or_else(|| FsError::NotFound {
            path: path.to_string(),
            operation: "delete".to_string(),
        })?;
        self.ensure_not_in_use(target, path, "delete")?;
        self.tree.remove_child(&parent, &leaf, "delete")
    }

    fn delete_all(&mut self, path: &str) -> Result<usize, FsError> {
        info!(path, "deleting all references");
        let target = self.tree.resolve(path, "deleteall")?.node();
        self.ensure_not_in_use(target, path, "deleteall")?;
        let removed = self.tree.remove_references(target);
        let paths: Vec<&str> = removed.iter().map(|r| r.path.as_str()).collect();
        info!(path, removed = ?paths, "removed references");
        Ok(removed.len())
    }

    fn append(&mut self, text: &str, path: &str) -> Result<(), FsError> {
        info!(path, text, "appending");
        let target = self.tree.resolve(path, "append")?.node();
        match self.tree.get_mut(target) {
            Some(Node::TextFile(file)) => {
                file.append(text);
                Ok(())
            }
            _ => Err(FsError::IsDirectory {
                path: path.to_string(),
                operation: "append".to_string(),
            }),
        }
    }

    fn show(&self, path: &str) -> Result<String, FsError> {
        info!(path, "showing");
        let target = self.tree.resolve(path, "show")?.node();
        match self.tree.get(target) {
            Some(Node::TextFile(file)) => Ok(file.content.clone()),
            _ => Err(FsError::IsDirectory {
                path: path.to_string(),
                operation: "show".to_string(),
            }),
        }
    }

    fn list(&self) -> Listing {
        let pwd = self.tree.pwd();
        info!(path = %pwd.path(), "listing");
        let entries = match self.tree.get(pwd.node()) {
            Some(Node::Directory(dir)) => dir
                .children
                .iter()
                .filter_map(|(name, &id)| {
                    let node = self.tree.get(id)?;
                    let kind = if node.is_directory() {
                        EntryKind::Directory
                    } else {
                        EntryKind::TextFile
                    };
                    Some(ListingEntry {
                        name: name.clone(),
                        kind,
                        size: node.size(),
                    })
                })
                .collect(),
            _ => Vec::new(),
        };
        Listing {
            path: pwd.path(),
            entries,
        }
    }

    fn mv(&mut self, src: &str, dest: &str) -> Result<(), FsError> {
        info!(source = src, dest, "moving");
        let source = self.tree.resolve(src, "move")?;
        self.move_entry(source, src, dest)
    }

    fn link(&mut self, link_path: &str, orig_path: &str) -> Result<(), FsError> {
        info!(link_path, orig_path, "linking");
        let orig = self.tree.resolve(orig_path, "link")?.node();
        let (parent, leaf) = self.tree.resolve_parent(link_path, "link")?;
        self.tree.insert_child(&parent, &leaf, orig, "link")
    }

    fn pwd(&self) -> String {
        self.tree.pwd().path()
    }
}

// ============================================================================
// Tests
// ============================================================================
