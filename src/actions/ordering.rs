use crate::model::NodeId;
use crate::store::DesignerStore;

/// Moves the root at `from_index` to `to_index`.
pub fn reorder_roots(store: &mut DesignerStore, from_index: usize, to_index: usize) -> bool {
    reorder(store, None, from_index, to_index)
}

/// Moves the child of `container_id` at `from_index` to `to_index`.
pub fn reorder_children(
    store: &mut DesignerStore,
    container_id: &NodeId,
    from_index: usize,
    to_index: usize,
) -> bool {
    reorder(store, Some(container_id), from_index, to_index)
}

/// Swaps `id` with its previous sibling. No-op when it is already first.
pub fn move_up(store: &mut DesignerStore, id: &NodeId) -> bool {
    let Some(location) = store.tree().locate(id) else {
        log::debug!("move_up: {} not found", id);
        return false;
    };
    if location.index == 0 {
        log::debug!("move_up: {} is already first", id);
        return false;
    }
    swap(store, location.parent.as_ref(), location.index - 1, location.index)
}

/// Swaps `id` with its next sibling. No-op when it is already last.
pub fn move_down(store: &mut DesignerStore, id: &NodeId) -> bool {
    let Some(location) = store.tree().locate(id) else {
        log::debug!("move_down: {} not found", id);
        return false;
    };
    swap(store, location.parent.as_ref(), location.index, location.index + 1)
}

fn swap(store: &mut DesignerStore, parent: Option<&NodeId>, a: usize, b: usize) -> bool {
    let tree = store.tree().rewrite_sequence(parent, |siblings| {
        if b >= siblings.len() {
            return false;
        }
        siblings.swap(a, b);
        true
    });
    match tree {
        Some(tree) => {
            store.commit(tree);
            true
        }
        None => false,
    }
}

pub(crate) fn reorder(
    store: &mut DesignerStore,
    parent: Option<&NodeId>,
    from_index: usize,
    to_index: usize,
) -> bool {
    let tree = store
        .tree()
        .rewrite_sequence(parent, |siblings| splice_move(siblings, from_index, to_index));
    match tree {
        Some(tree) => {
            store.commit(tree);
            true
        }
        None => {
            log::debug!(
                "reorder {} -> {} rejected in {:?}",
                from_index,
                to_index,
                parent
            );
            false
        }
    }
}

/// Removes the element at `from` and re-inserts it at `to` in the shortened
/// sequence, clamping `to`. Out-of-range `from` and no-op moves return false.
pub(crate) fn splice_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() {
        return false;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    from != to
}
