use std::collections::HashSet;
use std::sync::Arc;

use crate::model::{Node, NodeId, PropertyPatch, Widget};
use crate::store::DesignerStore;
use crate::tree::{subtree_ids, Tree};

/// Appends a fully formed node to the root sequence.
pub fn insert_root(store: &mut DesignerStore, node: Node) -> bool {
    let mut node = node.adopted_by(None);
    if let Widget::Container(props) = &mut node.widget {
        if props.width.is_empty() {
            props.width = "full".to_string();
        }
    }
    if collides(store.tree(), &node) {
        log::warn!("insert_root: {} reuses an id already in the tree", node.id);
        return false;
    }
    let mut roots = store.roots().to_vec();
    roots.push(Arc::new(node));
    store.commit(Tree::new(roots));
    true
}

/// Appends a new node built from `widget` to the container `container_id`.
/// Returns the fresh id, or `None` when the target is not a container.
pub fn insert_into(
    store: &mut DesignerStore,
    container_id: &NodeId,
    widget: Widget,
) -> Option<NodeId> {
    let node = Node::new(widget).adopted_by(Some(*container_id));
    if collides(store.tree(), &node) {
        log::warn!("insert_into: new subtree reuses an id already in the tree");
        return None;
    }
    let id = node.id;
    let node = Arc::new(node);
    let tree = store.tree().rewrite_sequence(Some(container_id), |children| {
        children.push(node);
        true
    });
    match tree {
        Some(tree) => {
            store.commit(tree);
            Some(id)
        }
        None => {
            log::debug!("insert_into: {} is not a container", container_id);
            None
        }
    }
}

/// Merges `patch` into the properties of `id`. A container's children are
/// never touched by a patch.
pub fn update_properties(store: &mut DesignerStore, id: &NodeId, patch: &PropertyPatch) -> bool {
    let tree = store.tree().rewrite(id, |node| {
        let mut updated = node.clone();
        for err in updated.widget.apply_patch(patch) {
            log::warn!("update_properties({}): {}", id, err);
        }
        (updated != *node).then_some(updated)
    });
    match tree {
        Some(tree) => {
            store.commit(tree);
            true
        }
        None => {
            log::debug!("update_properties: {} missing or unchanged", id);
            false
        }
    }
}

/// Deletes `id` and its whole subtree from whichever sequence holds it.
/// Removed ids are pruned from the selection.
pub fn remove(store: &mut DesignerStore, id: &NodeId) -> bool {
    let Some(node) = store.find(id) else {
        log::debug!("remove: {} not found", id);
        return false;
    };
    let removed: HashSet<NodeId> = subtree_ids(node).into_iter().collect();
    let parent = store.tree().find_parent(id).map(|p| p.id);

    let tree = store.tree().rewrite_sequence(parent.as_ref(), |siblings| {
        let before = siblings.len();
        siblings.retain(|sibling| sibling.id != *id);
        siblings.len() != before
    });
    let Some(tree) = tree else {
        return false;
    };
    store.commit(tree);
    store.prune_selection(&removed);
    true
}

/// Replaces the child sequence of `container_id`.
/// Rejected when the new children would duplicate ids elsewhere in the tree.
pub fn replace_children(
    store: &mut DesignerStore,
    container_id: &NodeId,
    children: Vec<Node>,
) -> bool {
    let children: Vec<Arc<Node>> = children
        .into_iter()
        .map(|child| Arc::new(child.adopted_by(Some(*container_id))))
        .collect();
    let Some(tree) = store
        .tree()
        .rewrite(container_id, |node| node.with_children(children))
    else {
        log::debug!("replace_children: {} is not a container", container_id);
        return false;
    };
    if !tree.has_unique_ids() {
        log::warn!("replace_children: children of {} duplicate existing ids", container_id);
        return false;
    }
    let removed: HashSet<NodeId> = store
        .tree()
        .ids()
        .into_iter()
        .filter(|id| !tree.contains(id))
        .collect();
    store.commit(tree);
    store.prune_selection(&removed);
    true
}

fn collides(tree: &Tree, node: &Node) -> bool {
    let existing: HashSet<NodeId> = tree.ids().into_iter().collect();
    let mut seen = HashSet::new();
    subtree_ids(node)
        .into_iter()
        .any(|id| existing.contains(&id) || !seen.insert(id))
}
