//! Alias Tracking
//!
//! A node reachable through several directory entries has several aliases.
//! The set is derived by walking the tree rather than stored, so it can never
//! drift from the entries themselves.

use std::collections::HashSet;

use super::node::{Node, NodeId};
use super::tree::Tree;

/// A directory entry that refers to some node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Directory holding the entry.
    pub dir: NodeId,
    /// Entry name inside `dir`.
    pub name: String,
    /// Absolute path of the entry along the first route the walk found.
    pub path: String,
}

impl Tree {
    /// Every entry in the tree whose value is `target`.
    ///
    /// Each directory is visited once, so linked cycles terminate. The walk
    /// does not descend into `target` itself.
    pub fn references_to(&self, target: NodeId) -> Vec<Reference> {
        let mut found = Vec::new();
        let mut visited = HashSet::new();
        let mut pending = vec![(self.root(), String::new())];
        visited.insert(self.root());

        while let Some((dir_id, dir_path)) = pending.pop() {
            let Some(Node::Directory(dir)) = self.get(dir_id) else {
                continue;
            };
            for (name, &child) in &dir.children {
                let path = format!("{}/{}", dir_path, name);
                if child == target {
                    found.push(Reference {
                        dir: dir_id,
                        name: name.clone(),
                        path,
                    });
                } else if matches!(self.get(child), Some(Node::Directory(_))) && visited.insert(child) {
                    pending.push((child, path));
                }
            }
        }

        found.sort_by(|a, b| a.path.cmp(&b.path));
        found
    }

    /// Remove every entry referring to `target`.
    ///
    /// All entries are collected before the first one is removed.
    pub fn remove_references(&mut self, target: NodeId) -> Vec<Reference> {
        let references = self.references_to(target);
        for reference in &references {
            self.unlink(reference.dir, &reference.name);
        }
        references
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mkdir(tree: &mut Tree, path: &str) -> NodeId {
        let (parent, leaf) = tree.resolve_parent(path, "mkdir").unwrap();
        tree.insert_new(&parent, &leaf, Node::directory(leaf.as_str()), "mkdir")
            .unwrap()
    }

    fn link(tree: &mut Tree, link_path: &str, orig: NodeId) {
        let (parent, leaf) = tree.resolve_parent(link_path, "link").unwrap();
        tree.insert_child(&parent, &leaf, orig, "link").unwrap();
    }

    #[test]
    fn test_references_found_everywhere() {
        let mut tree = Tree::new();
        let d = mkdir(&mut tree, "/d");
        mkdir(&mut tree, "/x");
        mkdir(&mut tree, "/x/y");
        link(&mut tree, "/alias1", d);
        link(&mut tree, "/x/y/alias2", d);

        let paths: Vec<String> = tree
            .references_to(d)
            .into_iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(paths, vec!["/alias1", "/d", "/x/y/alias2"]);
    }

    #[test]
    fn test_identity_not_structure() {
        let mut tree = Tree::new();
        let a = mkdir(&mut tree, "/a");
        mkdir(&mut tree, "/b");
        assert_eq!(tree.references_to(a).len(), 1);
    }

    #[test]
    fn test_cycle_terminates() {
        let mut tree = Tree::new();
        let d = mkdir(&mut tree, "/d");
        link(&mut tree, "/d/self", d);
        let e = mkdir(&mut tree, "/d/e");

        let refs = tree.references_to(e);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].path, "/d/e");
    }

    #[test]
    fn test_remove_references_reclaims_node() {
        let mut tree = Tree::new();
        let d = mkdir(&mut tree, "/d");
        let keep = mkdir(&mut tree, "/keep");
        link(&mut tree, "/keep/alias", d);
        assert_eq!(tree.link_count(d), 2);

        let removed = tree.remove_references(d);
        assert_eq!(removed.len(), 2);
        assert!(tree.get(d).is_none());
        assert!(tree.get(keep).is_some());
        assert!(tree.resolve("/keep/alias", "show").is_err());
    }
}
