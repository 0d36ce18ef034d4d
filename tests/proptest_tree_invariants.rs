//! Property tests: arbitrary intent sequences keep the tree well formed.
//!
//! After every step the live tree has unique ids with consistent parent
//! back-references, clipboard ids are unique and disjoint from the tree,
//! every selected id resolves, and the persisted blob round-trips.

mod common;

use std::collections::HashSet;

use common::{assert_tree_integrity, clipboard_ids};
use proptest::prelude::*;
use serde_json::json;
use widget_tree::persistence::{deserialize_tree, serialize_tree};
use widget_tree::{execute_action, Action, DesignerStore, DropIntent, Kind, NodeId, Widget};

#[derive(Debug, Clone)]
enum Step {
    DropOnCanvas(Kind),
    AddInto(usize, Kind),
    Patch(usize),
    Remove(usize),
    MoveUp(usize),
    MoveDown(usize),
    ReorderRoots(usize, usize),
    Group(usize, usize),
    GroupSelected,
    Ungroup(usize),
    Copy(usize),
    Paste(usize, Option<usize>),
    Select(usize, usize),
    Sort(usize, usize),
}

fn kind_strategy() -> impl Strategy<Value = Kind> {
    prop::sample::select(Kind::ALL.to_vec())
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => kind_strategy().prop_map(Step::DropOnCanvas),
        3 => (any::<usize>(), kind_strategy()).prop_map(|(a, k)| Step::AddInto(a, k)),
        1 => any::<usize>().prop_map(Step::Patch),
        1 => any::<usize>().prop_map(Step::Remove),
        1 => any::<usize>().prop_map(Step::MoveUp),
        1 => any::<usize>().prop_map(Step::MoveDown),
        1 => (0usize..8, 0usize..8).prop_map(|(a, b)| Step::ReorderRoots(a, b)),
        2 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Step::Group(a, b)),
        1 => Just(Step::GroupSelected),
        1 => any::<usize>().prop_map(Step::Ungroup),
        2 => any::<usize>().prop_map(Step::Copy),
        2 => (any::<usize>(), prop::option::of(any::<usize>())).prop_map(|(a, b)| Step::Paste(a, b)),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Step::Select(a, b)),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Step::Sort(a, b)),
    ]
}

fn pick(ids: &[NodeId], index: usize) -> Option<NodeId> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()])
    }
}

fn to_action(store: &DesignerStore, step: Step) -> Option<Action> {
    let ids = store.tree().ids();
    let entries: Vec<NodeId> = store.clipboard().entries().iter().map(|e| e.id).collect();
    let action = match step {
        Step::DropOnCanvas(kind) => Action::Drop(DropIntent::PaletteToCanvas(kind)),
        Step::AddInto(a, kind) => Action::InsertInto {
            container: pick(&ids, a)?,
            widget: Widget::default_for(kind),
        },
        Step::Patch(a) => Action::UpdateProperties {
            id: pick(&ids, a)?,
            patch: json!({ "className": "mt-2", "children": "Edited" })
                .as_object()
                .cloned()?,
        },
        Step::Remove(a) => Action::Remove(pick(&ids, a)?),
        Step::MoveUp(a) => Action::MoveUp(pick(&ids, a)?),
        Step::MoveDown(a) => Action::MoveDown(pick(&ids, a)?),
        Step::ReorderRoots(from, to) => Action::ReorderRoots { from, to },
        Step::Group(a, b) => Action::Group(vec![pick(&ids, a)?, pick(&ids, b)?]),
        Step::GroupSelected => Action::GroupSelected,
        Step::Ungroup(a) => Action::Ungroup(pick(&ids, a)?),
        Step::Copy(a) => Action::Copy(pick(&ids, a)?),
        Step::Paste(entry, container) => Action::Paste {
            container: match container {
                Some(c) => Some(pick(&ids, c)?),
                None => None,
            },
            entry: pick(&entries, entry)?,
        },
        Step::Select(a, b) => Action::Select(vec![pick(&ids, a)?, pick(&ids, b)?]),
        Step::Sort(a, b) => Action::Drop(DropIntent::Sort {
            active: pick(&ids, a)?,
            over: pick(&ids, b)?,
        }),
    };
    Some(action)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_sessions_keep_tree_well_formed(steps in prop::collection::vec(step_strategy(), 1..40)) {
        let mut store = DesignerStore::in_memory();

        for step in steps {
            if let Some(action) = to_action(&store, step) {
                execute_action(action, &mut store);
            }

            assert_tree_integrity(store.tree());

            let live: HashSet<NodeId> = store.tree().ids().into_iter().collect();
            let copied = clipboard_ids(&store);
            let copied_set: HashSet<NodeId> = copied.iter().copied().collect();
            prop_assert_eq!(copied.len(), copied_set.len());
            prop_assert!(copied_set.is_disjoint(&live));

            for id in store.selection().ids() {
                prop_assert!(live.contains(id), "selected id {} is stale", id);
            }
        }

        let blob = serialize_tree(store.tree(), false).unwrap();
        let restored = deserialize_tree(&blob).unwrap();
        prop_assert_eq!(&restored, store.tree());
        prop_assert!(!store.is_dirty());
    }
}
