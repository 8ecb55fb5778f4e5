//! Node Tree
//!
//! Arena of nodes addressed by [`NodeId`]. Every directory entry counts as one
//! link to the node it names; a node is reclaimed once its last link is gone.
//! The tree also carries the working-directory cursor.

use std::collections::HashMap;

use tracing::trace;

use super::node::{Node, NodeId};
use super::types::FsError;

/// One entry walked while resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    pub node: NodeId,
}

/// The chain of entries leading from the root to a node.
///
/// A cursor records *how* a node was reached, which matters once aliases
/// exist: the same directory may sit under several absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    root: NodeId,
    steps: Vec<Step>,
}

impl Cursor {
    fn at_root(root: NodeId) -> Self {
        Self {
            root,
            steps: Vec::new(),
        }
    }

    /// The node the cursor designates.
    pub fn node(&self) -> NodeId {
        self.steps.last().map_or(self.root, |step| step.node)
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Whether `id` is the designated node or any node above it.
    pub fn contains(&self, id: NodeId) -> bool {
        self.root == id || self.steps.iter().any(|step| step.node == id)
    }

    /// Index of the last step that goes through the entry `name` of the
    /// directory `holder`.
    pub fn last_step_through(&self, holder: NodeId, name: &str) -> Option<usize> {
        self.steps.iter().enumerate().rposition(|(index, step)| {
            let parent = if index == 0 {
                self.root
            } else {
                self.steps[index - 1].node
            };
            parent == holder && step.name == name
        })
    }

    /// Absolute path, `/` for the root.
    pub fn path(&self) -> String {
        let mut path = String::new();
        for step in &self.steps {
            path.push('/');
            path.push_str(&step.name);
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }

    /// Absolute path of the entry `name` inside this directory.
    pub fn child_path(&self, name: &str) -> String {
        if self.is_root() {
            format!("/{}", name)
        } else {
            format!("{}/{}", self.path(), name)
        }
    }

    /// Cursor of the directory holding the last step, with that step's name.
    pub fn split_last(&self) -> Option<(Cursor, &str)> {
        let (last, rest) = self.steps.split_last()?;
        let parent = Cursor {
            root: self.root,
            steps: rest.to_vec(),
        };
        Some((parent, last.name.as_str()))
    }

    fn push(&mut self, name: &str, node: NodeId) {
        self.steps.push(Step {
            name: name.to_string(),
            node,
        });
    }
}

/// Non-empty components of a path.
fn components(path: &str) -> Vec<&str> {
    path.split('/').filter(|part| !part.is_empty()).collect()
}

#[derive(Debug)]
struct Slot {
    node: Node,
    links: u32,
}

/// Arena-backed directory tree with a working directory.
#[derive(Debug)]
pub struct Tree {
    slots: HashMap<NodeId, Slot>,
    next_id: u64,
    root: NodeId,
    pwd: Cursor,
}

impl Tree {
    /// A tree holding only the root directory, which is also the working directory.
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut slots = HashMap::new();
        // The tree itself holds the root's only link.
        slots.insert(
            root,
            Slot {
                node: Node::directory(""),
                links: 1,
            },
        );
        Self {
            slots,
            next_id: 1,
            root,
            pwd: Cursor::at_root(root),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_cursor(&self) -> Cursor {
        Cursor::at_root(self.root)
    }

    pub fn pwd(&self) -> &Cursor {
        &self.pwd
    }

    pub(crate) fn set_pwd(&mut self, cursor: Cursor) {
        self.pwd = cursor;
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(&id).map(|slot| &slot.node)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(&id).map(|slot| &mut slot.node)
    }

    /// Number of directory entries currently referring to `id`.
    pub fn link_count(&self, id: NodeId) -> u32 {
        self.slots.get(&id).map_or(0, |slot| slot.links)
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.slots.len()
    }

    // ------------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------------

    /// Resolve `path` to the cursor that reaches it.
    ///
    /// An empty path designates the working directory.
    pub fn resolve(&self, path: &str, operation: &str) -> Result<Cursor, FsError> {
        let parts = components(path);
        self.walk(self.start(path), &parts, path, operation)
    }

    /// Resolve all but the last component of `path`.
    ///
    /// Returns the directory cursor and the leaf name. Fails with
    /// `InvalidName` when the path has no components at all.
    pub fn resolve_parent(&self, path: &str, operation: &str) -> Result<(Cursor, String), FsError> {
        let mut parts = components(path);
        let leaf = parts.pop().ok_or_else(|| FsError::InvalidName {
            path: path.to_string(),
            operation: operation.to_string(),
        })?;
        let parent = self.walk(self.start(path), &parts, path, operation)?;
        match self.get(parent.node()) {
            Some(Node::Directory(_)) => Ok((parent, leaf.to_string())),
            _ => Err(FsError::NotDirectory {
                path: path.to_string(),
                operation: operation.to_string(),
            }),
        }
    }

    fn start(&self, path: &str) -> Cursor {
        if path.starts_with('/') {
            self.root_cursor()
        } else {
            self.pwd.clone()
        }
    }

    fn walk(
        &self,
        mut cursor: Cursor,
        parts: &[&str],
        path: &str,
        operation: &str,
    ) -> Result<Cursor, FsError> {
        for part in parts {
            let next = match self.get(cursor.node()) {
                Some(Node::Directory(dir)) => dir.children.get(*part).copied(),
                Some(Node::TextFile(_)) => {
                    return Err(FsError::NotDirectory {
                        path: path.to_string(),
                        operation: operation.to_string(),
                    })
                }
                None => None,
            };
            match next {
                Some(id) => cursor.push(part, id),
                None => {
                    return Err(FsError::NotFound {
                        path: path.to_string(),
                        operation: operation.to_string(),
                    })
                }
            }
        }
        Ok(cursor)
    }

    /// The child `name` of the directory at `dir`, if present.
    pub fn child(&self, dir: &Cursor, name: &str) -> Option<NodeId> {
        self.get(dir.node())
            .and_then(Node::as_directory)
            .and_then(|d| d.children.get(name).copied())
    }

    // ------------------------------------------------------------------------
    // Structural mutation
    // ------------------------------------------------------------------------

    /// Allocate `node` and enter it as `name` in `dir`.
    pub fn insert_new(
        &mut self,
        dir: &Cursor,
        name: &str,
        node: Node,
        operation: &str,
    ) -> Result<NodeId, FsError> {
        self.check_vacant(dir, name, operation)?;
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.slots.insert(id, Slot { node, links: 0 });
        self.insert_child(dir, name, id, operation)?;
        Ok(id)
    }

    /// Enter an existing node as `name` in `dir`, adding one link to it.
    pub fn insert_child(
        &mut self,
        dir: &Cursor,
        name: &str,
        child: NodeId,
        operation: &str,
    ) -> Result<(), FsError> {
        self.check_vacant(dir, name, operation)?;
        if let Some(Node::Directory(d)) = self.get_mut(dir.node()) {
            d.children.insert(name.to_string(), child);
        }
        if let Some(slot) = self.slots.get_mut(&child) {
            slot.links += 1;
        }
        trace!(dir = %dir.path(), name, node = %child, "linked entry");
        Ok(())
    }

    /// Remove the entry `name` from `dir`, dropping one link from its node.
    pub fn remove_child(&mut self, dir: &Cursor, name: &str, operation: &str) -> Result<(), FsError> {
        if self.unlink(dir.node(), name).is_none() {
            return Err(FsError::NotFound {
                path: dir.child_path(name),
                operation: operation.to_string(),
            });
        }
        trace!(dir = %dir.path(), name, "unlinked entry");
        Ok(())
    }

    /// Point the existing entry `name` in `dir` at `child` instead.
    ///
    /// Returns the node previously named, which may since have been reclaimed.
    pub fn replace_child(
        &mut self,
        dir: &Cursor,
        name: &str,
        child: NodeId,
        operation: &str,
    ) -> Result<NodeId, FsError> {
        let previous = self.child(dir, name).ok_or_else(|| FsError::NotFound {
            path: dir.child_path(name),
            operation: operation.to_string(),
        })?;
        if previous == child {
            return Ok(previous);
        }
        if let Some(slot) = self.slots.get_mut(&child) {
            slot.links += 1;
        }
        if let Some(Node::Directory(d)) = self.get_mut(dir.node()) {
            d.children.insert(name.to_string(), child);
        }
        self.release(previous);
        Ok(previous)
    }

    fn check_vacant(&self, dir: &Cursor, name: &str, operation: &str) -> Result<(), FsError> {
        match self.get(dir.node()) {
            Some(Node::Directory(d)) if d.children.contains_key(name) => Err(FsError::AlreadyExists {
                path: dir.child_path(name),
                operation: operation.to_string(),
            }),
            Some(Node::Directory(_)) => Ok(()),
            _ => Err(FsError::NotDirectory {
                path: dir.path(),
                operation: operation.to_string(),
            }),
        }
    }

    /// Drop the entry `name` from the directory `dir`.
    pub(crate) fn unlink(&mut self, dir: NodeId, name: &str) -> Option<NodeId> {
        let removed = match self.get_mut(dir) {
            Some(Node::Directory(d)) => d.children.remove(name),
            _ => None,
        }?;
        self.release(removed);
        Some(removed)
    }

    /// Drop one link from `id`, reclaiming it and cascading into its
    /// children once nothing refers to it.
    fn release(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            let Some(slot) = self.slots.get_mut(&id) else {
                continue;
            };
            slot.links = slot.links.saturating_sub(1);
            if slot.links > 0 || id == self.root {
                continue;
            }
            if let Some(slot) = self.slots.remove(&id) {
                trace!(node = %id, name = slot.node.name(), "reclaimed node");
                if let Node::Directory(dir) = slot.node {
                    pending.extend(dir.children.into_values());
                }
            }
        }
    }

    /// Keep the working directory valid after the entry (`from`, `old_name`)
    /// was moved to (`to`, `new_name`).
    pub(crate) fn relocate_pwd(&mut self, from: &Cursor, old_name: &str, to: &Cursor, new_name: &str) {
        let moved = self.pwd.last_step_through(from.node(), old_name);
        let Some(index) = moved else {
            return;
        };
        let mut steps = to.steps.clone();
        steps.push(Step {
            name: new_name.to_string(),
            node: self.pwd.steps[index].node,
        });
        steps.extend_from_slice(&self.pwd.steps[index + 1..]);
        self.pwd = Cursor {
            root: self.root,
            steps,
        };
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mkdir(tree: &mut Tree, path: &str) -> NodeId {
        let (parent, leaf) = tree.resolve_parent(path, "mkdir").unwrap();
        tree.insert_new(&parent, &leaf, Node::directory(leaf.as_str()), "mkdir")
            .unwrap()
    }

    fn touch(tree: &mut Tree, path: &str) -> NodeId {
        let (parent, leaf) = tree.resolve_parent(path, "create").unwrap();
        tree.insert_new(&parent, &leaf, Node::text_file(leaf.as_str()), "create")
            .unwrap()
    }

    #[test]
    fn test_components_skip_empty_parts() {
        assert_eq!(components(""), Vec::<&str>::new());
        assert_eq!(components("/"), Vec::<&str>::new());
        assert_eq!(components("/a//b/"), vec!["a", "b"]);
        assert_eq!(components("a/b"), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_path_resolves_to_pwd() {
        let mut tree = Tree::new();
        let a = mkdir(&mut tree, "/a");
        let cursor = tree.resolve("/a", "enter").unwrap();
        tree.set_pwd(cursor);
        assert_eq!(tree.resolve("", "show").unwrap().node(), a);
    }

    #[test]
    fn test_relative_resolution_starts_at_pwd() {
        let mut tree = Tree::new();
        mkdir(&mut tree, "/a");
        let b = touch(&mut tree, "/a/b");
        tree.set_pwd(tree.resolve("/a", "enter").unwrap());
        let cursor = tree.resolve("b", "show").unwrap();
        assert_eq!(cursor.node(), b);
        assert_eq!(cursor.path(), "/a/b");
    }

    #[test]
    fn test_resolve_missing_component() {
        let tree = Tree::new();
        let err = tree.resolve("/nope/x", "show").unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }

    #[test]
    fn test_resolve_through_file_is_not_directory() {
        let mut tree = Tree::new();
        touch(&mut tree, "/f");
        let err = tree.resolve("/f/x", "show").unwrap_err();
        assert!(matches!(err, FsError::NotDirectory { .. }));
        let err = tree.resolve_parent("/f/x", "create").unwrap_err();
        assert!(matches!(err, FsError::NotDirectory { .. }));
    }

    #[test]
    fn test_resolve_parent_without_separator_uses_pwd() {
        let mut tree = Tree::new();
        let a = mkdir(&mut tree, "/a");
        tree.set_pwd(tree.resolve("/a", "enter").unwrap());
        let (parent, leaf) = tree.resolve_parent("new", "create").unwrap();
        assert_eq!(parent.node(), a);
        assert_eq!(leaf, "new");
    }

    #[test]
    fn test_resolve_parent_of_root_is_invalid() {
        let tree = Tree::new();
        assert!(matches!(
            tree.resolve_parent("/", "create").unwrap_err(),
            FsError::InvalidName { .. }
        ));
        assert!(matches!(
            tree.resolve_parent("", "create").unwrap_err(),
            FsError::InvalidName { .. }
        ));
    }

    #[test]
    fn test_insert_existing_name_fails() {
        let mut tree = Tree::new();
        touch(&mut tree, "/a");
        let root = tree.root_cursor();
        let err = tree
            .insert_new(&root, "a", Node::directory("a"), "mkdir")
            .unwrap_err();
        assert_eq!(
            err,
            FsError::AlreadyExists {
                path: "/a".to_string(),
                operation: "mkdir".to_string()
            }
        );
        // The rejected node was never allocated.
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_links_keep_node_alive() {
        let mut tree = Tree::new();
        let a = touch(&mut tree, "/a");
        let root = tree.root_cursor();
        tree.insert_child(&root, "b", a, "link").unwrap();
        assert_eq!(tree.link_count(a), 2);

        tree.remove_child(&root, "a", "delete").unwrap();
        assert_eq!(tree.link_count(a), 1);
        assert!(tree.get(a).is_some());

        tree.remove_child(&root, "b", "delete").unwrap();
        assert!(tree.get(a).is_none());
    }

    #[test]
    fn test_reclaiming_directory_releases_children() {
        let mut tree = Tree::new();
        mkdir(&mut tree, "/d");
        let inner = touch(&mut tree, "/d/f");
        let shared = touch(&mut tree, "/d/g");
        let root = tree.root_cursor();
        tree.insert_child(&root, "g", shared, "link").unwrap();

        tree.remove_child(&root, "d", "delete").unwrap();
        assert!(tree.get(inner).is_none());
        assert!(tree.get(shared).is_some());
        assert_eq!(tree.link_count(shared), 1);
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_remove_missing_child() {
        let mut tree = Tree::new();
        let root = tree.root_cursor();
        let err = tree.remove_child(&root, "ghost", "delete").unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }

    #[test]
    fn test_replace_child_swaps_target() {
        let mut tree = Tree::new();
        let a = touch(&mut tree, "/a");
        let b = touch(&mut tree, "/b");
        let root = tree.root_cursor();
        let previous = tree.replace_child(&root, "a", b, "replace").unwrap();
        assert_eq!(previous, a);
        assert!(tree.get(a).is_none());
        assert_eq!(tree.resolve("/a", "show").unwrap().node(), b);
        assert_eq!(tree.link_count(b), 2);

        let err = tree.replace_child(&root, "zzz", b, "replace").unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }

    #[test]
    fn test_cursor_paths() {
        let mut tree = Tree::new();
        mkdir(&mut tree, "/a");
        mkdir(&mut tree, "/a/b");
        let cursor = tree.resolve("/a/b", "enter").unwrap();
        assert_eq!(cursor.path(), "/a/b");
        assert_eq!(cursor.child_path("c"), "/a/b/c");
        assert_eq!(tree.root_cursor().path(), "/");
        assert_eq!(tree.root_cursor().child_path("c"), "/c");

        let (parent, name) = cursor.split_last().unwrap();
        assert_eq!(parent.path(), "/a");
        assert_eq!(name, "b");
        assert!(tree.root_cursor().split_last().is_none());
    }

    #[test]
    fn test_relocate_pwd_follows_moved_ancestor() {
        let mut tree = Tree::new();
        mkdir(&mut tree, "/a");
        mkdir(&mut tree, "/a/b");
        mkdir(&mut tree, "/z");
        tree.set_pwd(tree.resolve("/a/b", "enter").unwrap());

        let from = tree.root_cursor();
        let to = tree.resolve("/z", "move").unwrap();
        tree.relocate_pwd(&from, "a", &to, "moved");
        assert_eq!(tree.pwd().path(), "/z/moved/b");
    }

    #[test]
    fn test_relocate_pwd_uses_last_pass_through_moved_entry() {
        let mut tree = Tree::new();
        let d = mkdir(&mut tree, "/d");
        let e = mkdir(&mut tree, "/d/e");
        let holder = tree.resolve("/d/e", "link").unwrap();
        tree.insert_child(&holder, "up", d, "link").unwrap();
        tree.set_pwd(tree.resolve("/d/e/up/e", "enter").unwrap());
        assert_eq!(tree.pwd().last_step_through(d, "e"), Some(3));

        let from = tree.resolve("/d", "move").unwrap();
        let to = tree.root_cursor();
        tree.relocate_pwd(&from, "e", &to, "x");
        assert_eq!(tree.pwd().path(), "/x");
        assert_eq!(tree.pwd().node(), e);
    }

    proptest! {
        #[test]
        fn prop_absolute_resolution_ignores_pwd(choice in 0usize..4) {
            let mut tree = Tree::new();
            mkdir(&mut tree, "/a");
            mkdir(&mut tree, "/a/b");
            mkdir(&mut tree, "/c");
            let target = touch(&mut tree, "/a/b/t");
            let dirs = ["/", "/a", "/a/b", "/c"];
            tree.set_pwd(tree.resolve(dirs[choice], "enter").unwrap());
            prop_assert_eq!(tree.resolve("/a/b/t", "show").unwrap().node(), target);
            prop_assert_eq!(tree.resolve("/a/b/t", "show").unwrap().path(), "/a/b/t");
        }
    }
}
