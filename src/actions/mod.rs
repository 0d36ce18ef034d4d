mod clipboard;
mod component;
mod container;
mod drop;
mod ordering;
mod selection;

use crate::model::{Node, NodeId, PropertyPatch, Widget};
use crate::store::DesignerStore;

// Re-export all public functions from submodules
pub use self::drop::*;
pub use clipboard::*;
pub use component::*;
pub use container::*;
pub use ordering::*;
pub use selection::*;

/// Every intent the outer layers can issue against the store.
#[derive(Debug, Clone)]
pub enum Action {
    // Component lifecycle
    InsertRoot(Node),
    InsertInto {
        container: NodeId,
        widget: Widget,
    },
    UpdateProperties {
        id: NodeId,
        patch: PropertyPatch,
    },
    Remove(NodeId),
    ReplaceChildren {
        container: NodeId,
        children: Vec<Node>,
    },

    // Ordering
    ReorderRoots {
        from: usize,
        to: usize,
    },
    ReorderChildren {
        container: NodeId,
        from: usize,
        to: usize,
    },
    MoveUp(NodeId),
    MoveDown(NodeId),

    // Grouping
    Group(Vec<NodeId>),
    GroupSelected,
    Ungroup(NodeId),

    // Clipboard
    Copy(NodeId),
    Paste {
        container: Option<NodeId>,
        entry: NodeId,
    },
    DiscardClipboardEntry(NodeId),

    // Selection
    Select(Vec<NodeId>),
    ExtendSelection(NodeId),
    ClearSelection,

    // Drag and drop
    Drop(DropIntent),

    // Canvas
    SeedCanvas,
    Save,
}

/// Routes `action` to its operation. Returns whether anything changed.
pub fn execute_action(action: Action, store: &mut DesignerStore) -> bool {
    match action {
        Action::InsertRoot(node) => insert_root(store, node),
        Action::InsertInto { container, widget } => {
            insert_into(store, &container, widget).is_some()
        }
        Action::UpdateProperties { id, patch } => update_properties(store, &id, &patch),
        Action::Remove(id) => remove(store, &id),
        Action::ReplaceChildren {
            container,
            children,
        } => replace_children(store, &container, children),

        Action::ReorderRoots { from, to } => reorder_roots(store, from, to),
        Action::ReorderChildren {
            container,
            from,
            to,
        } => reorder_children(store, &container, from, to),
        Action::MoveUp(id) => move_up(store, &id),
        Action::MoveDown(id) => move_down(store, &id),

        Action::Group(ids) => group(store, &ids).is_some(),
        Action::GroupSelected => group_selected(store).is_some(),
        Action::Ungroup(id) => ungroup(store, &id),

        Action::Copy(id) => copy(store, &id).is_some(),
        Action::Paste { container, entry } => paste(store, container.as_ref(), &entry).is_some(),
        Action::DiscardClipboardEntry(id) => discard_clipboard_entry(store, &id),

        Action::Select(ids) => {
            select(store, ids);
            true
        }
        Action::ExtendSelection(id) => extend_selection(store, id),
        Action::ClearSelection => {
            clear_selection(store);
            true
        }

        Action::Drop(intent) => apply_drop(store, intent),

        Action::SeedCanvas => store.seed_canvas(),
        Action::Save => store.save(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Kind;

    #[test]
    fn test_execute_routes_each_intent() {
        let mut store = DesignerStore::in_memory();
        assert!(execute_action(Action::SeedCanvas, &mut store));
        let root = store.roots()[0].id;

        assert!(execute_action(
            Action::InsertInto {
                container: root,
                widget: Widget::default_for(Kind::Button),
            },
            &mut store
        ));
        assert!(execute_action(
            Action::Drop(DropIntent::PaletteToCanvas(Kind::Label)),
            &mut store
        ));
        assert_eq!(store.roots().len(), 2);

        assert!(execute_action(Action::Copy(root), &mut store));
        let entry = store.clipboard().entries()[0].id;
        assert!(execute_action(
            Action::Paste {
                container: None,
                entry,
            },
            &mut store
        ));
        assert_eq!(store.roots().len(), 3);

        assert!(execute_action(Action::MoveDown(root), &mut store));
        assert_eq!(store.roots()[1].id, root);

        assert!(execute_action(Action::Remove(root), &mut store));
        assert!(!execute_action(Action::Remove(root), &mut store));
        assert!(store.tree().has_unique_ids());
    }

    #[test]
    fn test_group_selected_through_dispatcher() {
        let mut store = DesignerStore::in_memory();
        for _ in 0..2 {
            execute_action(Action::Drop(DropIntent::PaletteToCanvas(Kind::Card)), &mut store);
        }
        let ids: Vec<NodeId> = store.roots().iter().map(|n| n.id).collect();
        execute_action(Action::Select(ids.clone()), &mut store);

        assert!(execute_action(Action::GroupSelected, &mut store));
        let group = store.selection().primary().unwrap();
        assert_eq!(store.roots().len(), 1);

        assert!(execute_action(Action::Ungroup(group), &mut store));
        assert_eq!(store.selection().ids(), ids.as_slice());
    }
}
