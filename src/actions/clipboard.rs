use std::sync::Arc;

use crate::clipboard::clone_with_new_ids;
use crate::model::NodeId;
use crate::store::DesignerStore;
use crate::tree::Tree;

/// Copies the subtree rooted at `id` into the clipboard under fresh ids.
/// Returns the clipboard entry id.
pub fn copy(store: &mut DesignerStore, id: &NodeId) -> Option<NodeId> {
    let Some(source) = store.find(id) else {
        log::debug!("copy: {} not found", id);
        return None;
    };
    let entry = clone_with_new_ids(source, None);
    let entry_id = store.clipboard_mut().push(entry);
    log::debug!("Copied {} to clipboard entry {}", id, entry_id);
    Some(entry_id)
}

/// Pastes a fresh clone of the clipboard entry `entry_id` as the last child
/// of `container_id`, or as a new root when `container_id` is `None`.
/// The entry stays in the clipboard. Returns the id of the pasted root.
pub fn paste(
    store: &mut DesignerStore,
    container_id: Option<&NodeId>,
    entry_id: &NodeId,
) -> Option<NodeId> {
    let Some(entry) = store.clipboard().get(entry_id) else {
        log::debug!("paste: no clipboard entry {}", entry_id);
        return None;
    };
    let pasted = clone_with_new_ids(entry, container_id.copied());
    let pasted_id = pasted.id;
    let pasted = Arc::new(pasted);

    let tree = match container_id {
        None => {
            let mut roots = store.roots().to_vec();
            roots.push(pasted);
            Some(Tree::new(roots))
        }
        Some(parent) => store.tree().rewrite_sequence(Some(parent), |children| {
            children.push(pasted);
            true
        }),
    };
    let Some(tree) = tree else {
        log::debug!("paste: {:?} is not a container", container_id);
        return None;
    };
    store.commit(tree);
    Some(pasted_id)
}

pub fn discard_clipboard_entry(store: &mut DesignerStore, entry_id: &NodeId) -> bool {
    store.clipboard_mut().discard(entry_id)
}
