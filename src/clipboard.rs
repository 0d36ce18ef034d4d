use std::sync::Arc;

use crate::model::{Node, NodeId, Widget};

/// Copied subtrees, held apart from the live tree and addressed by their own
/// root ids. Transient: never persisted.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    entries: Vec<Arc<Node>>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Arc<Node>] {
        &self.entries
    }

    pub fn get(&self, id: &NodeId) -> Option<&Arc<Node>> {
        self.entries.iter().find(|entry| entry.id == *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn push(&mut self, entry: Node) -> NodeId {
        let id = entry.id;
        self.entries.push(Arc::new(entry));
        id
    }

    pub(crate) fn discard(&mut self, id: &NodeId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != *id);
        before != self.entries.len()
    }
}

/// Deep copy of `node` where the copy and every descendant get fresh ids.
/// Descendants point at their new parents; the copy points at `parent_id`.
pub fn clone_with_new_ids(node: &Node, parent_id: Option<NodeId>) -> Node {
    let id = NodeId::generate();
    let widget = match &node.widget {
        Widget::Container(props) => {
            let children = props
                .children
                .iter()
                .map(|child| Arc::new(clone_with_new_ids(child, Some(id))))
                .collect();
            Widget::Container(props.with_children(children))
        }
        other => other.clone(),
    };
    Node {
        id,
        widget,
        parent_id,
    }
}
