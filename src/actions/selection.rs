use crate::model::NodeId;
use crate::store::DesignerStore;

/// Replaces the selection. Ids are not checked against the tree.
pub fn select(store: &mut DesignerStore, ids: Vec<NodeId>) {
    store.selection_mut().set(ids);
}

/// Shift-click: appends `id` to the selection.
pub fn extend_selection(store: &mut DesignerStore, id: NodeId) -> bool {
    store.selection_mut().extend(id)
}

pub fn clear_selection(store: &mut DesignerStore) {
    store.selection_mut().clear();
}

/// The id the property panel edits.
pub fn primary_selection(store: &DesignerStore) -> Option<NodeId> {
    store.selection().primary()
}
