use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::model::{Node, NodeId};

/// Where a node sits: the owning container (`None` for the root sequence)
/// and its index in that sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub parent: Option<NodeId>,
    pub index: usize,
}

/// An immutable snapshot of the root sequence.
///
/// Every rewrite returns a new `Tree`. Nodes on the path from the root to the
/// rewritten node are rebuilt; every other subtree is shared by reference
/// with the previous snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
    roots: Vec<Arc<Node>>,
}

enum Rewrite {
    Missing,
    Unchanged,
    Replaced(Vec<Arc<Node>>),
}

impl Tree {
    pub fn new(roots: Vec<Arc<Node>>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Arc<Node>] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes, containers and descendants included.
    pub fn node_count(&self) -> usize {
        self.flatten().len()
    }

    /// Depth-first pre-order search over the roots and every container's children.
    pub fn find(&self, id: &NodeId) -> Option<&Arc<Node>> {
        find_in(&self.roots, id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.find(id).is_some()
    }

    /// The container whose immediate children include `id`.
    /// `None` for root nodes and for unknown ids.
    pub fn find_parent(&self, id: &NodeId) -> Option<&Arc<Node>> {
        find_parent_in(&self.roots, id)
    }

    /// Every node in pre-order, parents before children.
    pub fn flatten(&self) -> Vec<&Arc<Node>> {
        let mut out = Vec::new();
        flatten_into(&self.roots, &mut out);
        out
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.flatten().into_iter().map(|node| node.id).collect()
    }

    pub fn locate(&self, id: &NodeId) -> Option<Location> {
        let parent = self.find_parent(id).map(|p| p.id);
        let index = self
            .sequence(parent.as_ref())?
            .iter()
            .position(|node| node.id == *id)?;
        Some(Location { parent, index })
    }

    /// The sequence owned by `parent`, or the root sequence for `None`.
    /// `None` when `parent` is missing or is not a container.
    pub fn sequence(&self, parent: Option<&NodeId>) -> Option<&[Arc<Node>]> {
        match parent {
            None => Some(&self.roots),
            Some(id) => {
                let node = self.find(id)?;
                node.is_container().then(|| node.children())
            }
        }
    }

    /// Path-copy rewrite of the node `id`.
    ///
    /// `transform` returns the replacement node, or `None` to leave the tree
    /// untouched. Returns `None` when `id` is missing or nothing changed.
    pub fn rewrite<F>(&self, id: &NodeId, transform: F) -> Option<Tree>
    where
        F: FnOnce(&Node) -> Option<Node>,
    {
        let mut transform = Some(transform);
        match rewrite_in(&self.roots, id, &mut transform) {
            Rewrite::Replaced(roots) => Some(Tree::new(roots)),
            Rewrite::Missing | Rewrite::Unchanged => None,
        }
    }

    /// Rewrites one sibling sequence: the roots for `None`, else the children
    /// of the container `parent`. `edit` returns false to abandon the rewrite.
    pub fn rewrite_sequence<F>(&self, parent: Option<&NodeId>, edit: F) -> Option<Tree>
    where
        F: FnOnce(&mut Vec<Arc<Node>>) -> bool,
    {
        match parent {
            None => {
                let mut roots = self.roots.clone();
                edit(&mut roots).then(|| Tree::new(roots))
            }
            Some(parent_id) => self.rewrite(parent_id, |node| {
                if !node.is_container() {
                    return None;
                }
                let mut children = node.children().to_vec();
                if !edit(&mut children) {
                    return None;
                }
                node.with_children(children)
            }),
        }
    }

    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::new();
        self.flatten().into_iter().all(|node| seen.insert(node.id))
    }
}

/// Ids of `node` and all of its descendants, pre-order.
pub fn subtree_ids(node: &Node) -> Vec<NodeId> {
    let mut ids = vec![node.id];
    let mut nested = Vec::new();
    flatten_into(node.children(), &mut nested);
    ids.extend(nested.into_iter().map(|n| n.id));
    ids
}

fn find_in<'a>(nodes: &'a [Arc<Node>], id: &NodeId) -> Option<&'a Arc<Node>> {
    for node in nodes {
        if node.id == *id {
            return Some(node);
        }
        if let Some(found) = find_in(node.children(), id) {
            return Some(found);
        }
    }
    None
}

fn find_parent_in<'a>(nodes: &'a [Arc<Node>], id: &NodeId) -> Option<&'a Arc<Node>> {
    for node in nodes {
        let children = node.children();
        if children.iter().any(|child| child.id == *id) {
            return Some(node);
        }
        if let Some(found) = find_parent_in(children, id) {
            return Some(found);
        }
    }
    None
}

fn flatten_into<'a>(nodes: &'a [Arc<Node>], out: &mut Vec<&'a Arc<Node>>) {
    for node in nodes {
        out.push(node);
        flatten_into(node.children(), out);
    }
}

fn rewrite_in<F>(nodes: &[Arc<Node>], id: &NodeId, transform: &mut Option<F>) -> Rewrite
where
    F: FnOnce(&Node) -> Option<Node>,
{
    for (index, node) in nodes.iter().enumerate() {
        let replacement = if node.id == *id {
            match transform.take().and_then(|f| f(node)) {
                Some(new_node) => new_node,
                None => return Rewrite::Unchanged,
            }
        } else {
            match rewrite_in(node.children(), id, transform) {
                Rewrite::Missing => continue,
                Rewrite::Unchanged => return Rewrite::Unchanged,
                Rewrite::Replaced(children) => match node.with_children(children) {
                    Some(rebuilt) => rebuilt,
                    None => return Rewrite::Unchanged,
                },
            }
        };
        let mut rebuilt = nodes.to_vec();
        rebuilt[index] = Arc::new(replacement);
        return Rewrite::Replaced(rebuilt);
    }
    Rewrite::Missing
}
