use std::collections::HashSet;
use std::sync::Arc;

use crate::clipboard::Clipboard;
use crate::model::{Kind, Node, NodeId};
use crate::persistence::Persistence;
use crate::selection::Selection;
use crate::tree::Tree;

/// The single owner of the live tree, the selection and the clipboard.
///
/// Structural changes go through the operations in [`crate::actions`]; each
/// one swaps in a new [`Tree`] snapshot via `commit`, which also persists it.
pub struct DesignerStore {
    tree: Tree,
    selection: Selection,
    clipboard: Clipboard,
    persistence: Persistence,
    is_dirty: bool,
}

impl DesignerStore {
    /// Opens a store on the tree persisted in `persistence`.
    pub fn open(persistence: Persistence) -> Self {
        let tree = persistence.load();
        Self {
            tree,
            selection: Selection::new(),
            clipboard: Clipboard::new(),
            persistence,
            is_dirty: false,
        }
    }

    pub fn in_memory() -> Self {
        Self::open(Persistence::in_memory())
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn roots(&self) -> &[Arc<Node>] {
        self.tree.roots()
    }

    pub fn find(&self, id: &NodeId) -> Option<&Arc<Node>> {
        self.tree.find(id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// True while the in-memory tree differs from the last successful save.
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// The node the property panel edits: the primary selection, if it resolves.
    pub fn active_node(&self) -> Option<&Arc<Node>> {
        self.selection.primary().and_then(|id| self.tree.find(&id))
    }

    /// Gives an empty canvas one default container.
    pub fn seed_canvas(&mut self) -> bool {
        if !self.tree.is_empty() {
            return false;
        }
        let root = Arc::new(Node::of_kind(Kind::Container));
        log::info!("Seeding empty canvas with container {}", root.id);
        self.commit(Tree::new(vec![root]));
        true
    }

    /// Writes the current tree. Failures are logged and leave the store dirty.
    pub fn save(&mut self) -> bool {
        match self.persistence.save(&self.tree) {
            Ok(()) => {
                self.is_dirty = false;
                true
            }
            Err(e) => {
                log::error!("Failed to persist component tree: {}", e);
                self.is_dirty = true;
                false
            }
        }
    }

    pub(crate) fn commit(&mut self, tree: Tree) {
        self.tree = tree;
        self.save();
    }

    pub(crate) fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub(crate) fn clipboard_mut(&mut self) -> &mut Clipboard {
        &mut self.clipboard
    }

    pub(crate) fn prune_selection(&mut self, removed: &HashSet<NodeId>) {
        let dropped = self.selection.prune(removed);
        if dropped > 0 {
            log::debug!("Pruned {} removed ids from the selection", dropped);
        }
    }
}
