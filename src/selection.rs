use std::collections::HashSet;

use crate::model::NodeId;

/// Ordered set of the node ids currently active for editing.
///
/// The tracker does not check ids against the tree; the operations that
/// remove nodes prune it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole selection. Duplicates keep their first position.
    pub fn set(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    /// Appends `id` unless already selected.
    pub fn extend(&mut self, id: NodeId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// The node the property panel edits.
    pub fn primary(&self) -> Option<NodeId> {
        self.ids.first().copied()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drops every selected id in `removed`. Returns how many were dropped.
    pub fn prune(&mut self, removed: &HashSet<NodeId>) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| !removed.contains(id));
        before - self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_dedupes_and_keeps_order() {
        let a = NodeId::generate();
        let b = NodeId::generate();
        let mut selection = Selection::new();
        selection.set([b, a, b]);
        assert_eq!(selection.ids(), &[b, a]);
        assert_eq!(selection.primary(), Some(b));
    }

    #[test]
    fn test_extend() {
        let a = NodeId::generate();
        let mut selection = Selection::new();
        assert!(selection.extend(a));
        assert!(!selection.extend(a));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_prune() {
        let a = NodeId::generate();
        let b = NodeId::generate();
        let mut selection = Selection::new();
        selection.set([a, b]);
        let removed: HashSet<NodeId> = [a].into_iter().collect();
        assert_eq!(selection.prune(&removed), 1);
        assert_eq!(selection.ids(), &[b]);
    }
}
