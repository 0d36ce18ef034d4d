use super::ordering::reorder;
use crate::actions::{insert_into, insert_root};
use crate::model::{Kind, NodeId, Widget};
use crate::registry;
use crate::store::DesignerStore;

/// A completed drag as reported by the drag-and-drop layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIntent {
    /// A palette item released over the canvas background.
    PaletteToCanvas(Kind),
    /// A palette item released anywhere else; lands in the selected container.
    PaletteToSelection(Kind),
    /// An existing node `active` released over the node `over`.
    Sort { active: NodeId, over: NodeId },
}

/// Resolves a drop into at most one tree operation.
pub fn apply_drop(store: &mut DesignerStore, intent: DropIntent) -> bool {
    match intent {
        DropIntent::PaletteToCanvas(kind) => insert_root(store, registry::new_node(kind)),
        DropIntent::PaletteToSelection(kind) => {
            let Some(target) = store.active_node() else {
                log::debug!("drop: no selected container for {}", kind);
                return false;
            };
            if !target.is_container() {
                log::debug!("drop: selection {} is not a container", target.id);
                return false;
            }
            let target = target.id;
            insert_into(store, &target, Widget::default_for(kind)).is_some()
        }
        DropIntent::Sort { active, over } => {
            if active == over {
                return false;
            }
            let (Some(from), Some(to)) = (store.tree().locate(&active), store.tree().locate(&over))
            else {
                log::debug!("drop: sort between unknown nodes {} and {}", active, over);
                return false;
            };
            if from.parent != to.parent {
                log::debug!("drop: {} and {} are not siblings", active, over);
                return false;
            }
            reorder(store, from.parent.as_ref(), from.index, to.index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::select;
    use crate::model::Node;

    #[test]
    fn test_palette_to_canvas_appends_root() {
        let mut store = DesignerStore::in_memory();
        assert!(apply_drop(&mut store, DropIntent::PaletteToCanvas(Kind::Button)));
        assert_eq!(store.roots().len(), 1);
        assert_eq!(store.roots()[0].kind(), Kind::Button);
    }

    #[test]
    fn test_palette_to_selected_container() {
        let mut store = DesignerStore::in_memory();
        let container = Node::of_kind(Kind::Container);
        let container_id = container.id;
        insert_root(&mut store, container);

        assert!(!apply_drop(&mut store, DropIntent::PaletteToSelection(Kind::Input)));

        select(&mut store, vec![container_id]);
        assert!(apply_drop(&mut store, DropIntent::PaletteToSelection(Kind::Input)));
        let children = store.find(&container_id).unwrap().children().to_vec();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].kind(), Kind::Input);
    }

    #[test]
    fn test_palette_to_selected_leaf_is_noop() {
        let mut store = DesignerStore::in_memory();
        let label = Node::of_kind(Kind::Label);
        let label_id = label.id;
        insert_root(&mut store, label);
        select(&mut store, vec![label_id]);

        assert!(!apply_drop(&mut store, DropIntent::PaletteToSelection(Kind::Input)));
        assert_eq!(store.tree().node_count(), 1);
    }

    #[test]
    fn test_sort_between_siblings() {
        let mut store = DesignerStore::in_memory();
        let ids: Vec<NodeId> = (0..3)
            .map(|_| {
                let node = Node::of_kind(Kind::Label);
                let id = node.id;
                insert_root(&mut store, node);
                id
            })
            .collect();

        assert!(apply_drop(
            &mut store,
            DropIntent::Sort { active: ids[0], over: ids[2] }
        ));
        let order: Vec<NodeId> = store.roots().iter().map(|n| n.id).collect();
        assert_eq!(order, vec![ids[1], ids[2], ids[0]]);

        assert!(!apply_drop(
            &mut store,
            DropIntent::Sort { active: ids[1], over: ids[1] }
        ));
    }

    #[test]
    fn test_sort_across_parents_is_noop() {
        let mut store = DesignerStore::in_memory();
        let container = Node::of_kind(Kind::Container);
        let container_id = container.id;
        insert_root(&mut store, container);
        let child = insert_into(&mut store, &container_id, Widget::default_for(Kind::Card)).unwrap();
        let before = store.tree().clone();

        assert!(!apply_drop(
            &mut store,
            DropIntent::Sort { active: child, over: container_id }
        ));
        assert_eq!(store.tree(), &before);
    }
}
