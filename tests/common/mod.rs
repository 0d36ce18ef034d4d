use std::collections::HashSet;
use std::sync::Arc;

use widget_tree::actions::{insert_into, insert_root};
use widget_tree::tree::subtree_ids;
use widget_tree::{DesignerStore, Kind, Node, NodeId, Tree, Widget};

/// Appends a default node of `kind` to the roots and returns its id.
pub fn add_root(store: &mut DesignerStore, kind: Kind) -> NodeId {
    let node = Node::of_kind(kind);
    let id = node.id;
    assert!(insert_root(store, node), "insert_root rejected a fresh node");
    id
}

/// Appends a default node of `kind` to the container `parent`.
pub fn add_child(store: &mut DesignerStore, parent: NodeId, kind: Kind) -> NodeId {
    insert_into(store, &parent, Widget::default_for(kind)).expect("parent must be a container")
}

#[allow(dead_code)]
pub fn root_ids(store: &DesignerStore) -> Vec<NodeId> {
    store.roots().iter().map(|node| node.id).collect()
}

#[allow(dead_code)]
pub fn child_ids(store: &DesignerStore, id: NodeId) -> Vec<NodeId> {
    store
        .find(&id)
        .expect("node must exist")
        .children()
        .iter()
        .map(|node| node.id)
        .collect()
}

/// Builds the layout used across tests:
///
/// ```text
/// container (page)
///     label
///     container (form)
///         input
///         button
/// card
/// ```
#[allow(dead_code)]
pub struct SampleLayout {
    pub store: DesignerStore,
    pub page: NodeId,
    pub title: NodeId,
    pub form: NodeId,
    pub input: NodeId,
    pub submit: NodeId,
    pub card: NodeId,
}

#[allow(dead_code)]
pub fn sample_layout() -> SampleLayout {
    let mut store = DesignerStore::in_memory();
    let page = add_root(&mut store, Kind::Container);
    let title = add_child(&mut store, page, Kind::Label);
    let form = add_child(&mut store, page, Kind::Container);
    let input = add_child(&mut store, form, Kind::Input);
    let submit = add_child(&mut store, form, Kind::Button);
    let card = add_root(&mut store, Kind::Card);
    SampleLayout {
        store,
        page,
        title,
        form,
        input,
        submit,
        card,
    }
}

/// Checks the invariants every reachable tree must hold: unique ids, parent
/// back-references that agree with containment, and children only under
/// containers.
pub fn assert_tree_integrity(tree: &Tree) {
    let mut seen = HashSet::new();
    for root in tree.roots() {
        assert!(
            root.parent_id.is_none(),
            "root {} has parent {:?}",
            root.id,
            root.parent_id
        );
        check_node(root, &mut seen);
    }
}

fn check_node(node: &Arc<Node>, seen: &mut HashSet<NodeId>) {
    assert!(seen.insert(node.id), "duplicate id {}", node.id);
    if !node.is_container() {
        assert!(node.children().is_empty(), "{} is a leaf with children", node.id);
    }
    for child in node.children() {
        assert_eq!(
            child.parent_id,
            Some(node.id),
            "child {} does not point at its container",
            child.id
        );
        check_node(child, seen);
    }
}

/// Ids held by the clipboard, all entries and descendants included.
#[allow(dead_code)]
pub fn clipboard_ids(store: &DesignerStore) -> Vec<NodeId> {
    store
        .clipboard()
        .entries()
        .iter()
        .flat_map(|entry| subtree_ids(entry))
        .collect()
}
