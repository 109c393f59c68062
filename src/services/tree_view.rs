use std::path::Path;

use crate::error::ScanError;
use crate::services::vault_service::{self, DirectoryLister, FileTreeNode};

/// In-memory expansion state over one scanned forest.
///
/// Only `is_open` flags are ever mutated here. `refresh` replaces the forest
/// wholesale, so expansion state is not preserved across a rescan; every
/// node comes back closed. That is documented behavior, not an accident.
#[derive(Debug, Default)]
pub struct TreeViewState {
    forest: Vec<FileTreeNode>,
}

impl TreeViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_forest(forest: Vec<FileTreeNode>) -> Self {
        Self { forest }
    }

    pub fn forest(&self) -> &[FileTreeNode] {
        &self.forest
    }

    /// Flips the open flag of the node at `path`, in place. Returns false
    /// when no such node exists. Toggling a file is a permitted no-op as far
    /// as rendering goes; the flag still flips.
    pub fn toggle(&mut self, path: &str) -> bool {
        match find_node_mut(&mut self.forest, path) {
            Some(node) => {
                node.is_open = !node.is_open;
                true
            }
            None => false,
        }
    }

    /// Rescans `root` and replaces the forest, discarding all previous
    /// expansion state.
    pub fn refresh<L: DirectoryLister>(&mut self, lister: &L, root: &Path) -> Result<(), ScanError> {
        self.forest = vault_service::scan_vault_with(lister, root)?;
        Ok(())
    }
}

fn find_node_mut<'a>(nodes: &'a mut [FileTreeNode], path: &str) -> Option<&'a mut FileTreeNode> {
    for node in nodes.iter_mut() {
        if node.path == path {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = find_node_mut(children, path) {
                return Some(found);
            }
        }
    }
    None
}
