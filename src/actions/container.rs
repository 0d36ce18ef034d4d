use std::sync::Arc;

use crate::model::{Kind, Node, NodeId, Widget};
use crate::store::DesignerStore;

/// Wraps the nodes `ids` into a new default container.
///
/// All ids must resolve and share one parent (or all be roots), and at least
/// two are needed. The grouped nodes keep their identities and their relative
/// order; the container is appended to the shared sequence and becomes the
/// sole selection. Returns the container id, or `None` when rejected.
pub fn group(store: &mut DesignerStore, ids: &[NodeId]) -> Option<NodeId> {
    let mut wanted: Vec<NodeId> = Vec::new();
    for id in ids {
        if !wanted.contains(id) {
            wanted.push(*id);
        }
    }
    if wanted.len() < 2 {
        log::debug!("group: need at least two nodes, got {}", wanted.len());
        return None;
    }

    let mut parent = None;
    for (i, id) in wanted.iter().enumerate() {
        let Some(location) = store.tree().locate(id) else {
            log::debug!("group: {} not found", id);
            return None;
        };
        if i == 0 {
            parent = location.parent;
        } else if location.parent != parent {
            log::debug!("group: selection spans more than one parent");
            return None;
        }
    }

    let mut container = Node::of_kind(Kind::Container);
    container.parent_id = parent;
    let container_id = container.id;

    let tree = store.tree().rewrite_sequence(parent.as_ref(), |siblings| {
        let (grouped, kept): (Vec<_>, Vec<_>) = siblings
            .drain(..)
            .partition(|sibling| wanted.contains(&sibling.id));
        let grouped = grouped
            .into_iter()
            .map(|node| Arc::new(node.with_parent(Some(container_id))))
            .collect();
        let Some(container) = container.with_children(grouped) else {
            return false;
        };
        *siblings = kept;
        siblings.push(Arc::new(container));
        true
    })?;

    store.commit(tree);
    store.selection_mut().set([container_id]);
    log::debug!("Grouped {} nodes into {}", wanted.len(), container_id);
    Some(container_id)
}

/// Groups the current selection.
pub fn group_selected(store: &mut DesignerStore) -> Option<NodeId> {
    let ids = store.selection().ids().to_vec();
    group(store, &ids)
}

/// Replaces the container `id` by its children, in place. The children
/// become the selection.
pub fn ungroup(store: &mut DesignerStore, id: &NodeId) -> bool {
    let Some(location) = store.tree().locate(id) else {
        log::debug!("ungroup: {} not found", id);
        return false;
    };
    let Some(node) = store.find(id).cloned() else {
        return false;
    };
    if !matches!(node.widget, Widget::Container(_)) {
        log::debug!("ungroup: {} is not a container", id);
        return false;
    }

    let released: Vec<Arc<Node>> = node
        .children()
        .iter()
        .map(|child| Arc::new(child.with_parent(location.parent)))
        .collect();
    let released_ids: Vec<NodeId> = released.iter().map(|child| child.id).collect();

    let tree = store
        .tree()
        .rewrite_sequence(location.parent.as_ref(), |siblings| {
            if siblings.get(location.index).map(|n| n.id) != Some(*id) {
                return false;
            }
            siblings.splice(location.index..=location.index, released);
            true
        });
    let Some(tree) = tree else {
        return false;
    };
    store.commit(tree);
    store.selection_mut().set(released_ids);
    true
}
