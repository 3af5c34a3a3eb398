//! Row Tree Reconciliation
//!
//! Locates a node by id inside an owned tree and replaces, inserts or
//! removes it in place. Walks are depth-first, pre-order, and stop at the
//! first match. An absent id is never an error: the operation is a no-op
//! and reports `false`.
//!
//! Callers are expected to run these on a private draft of the tree and
//! publish the draft afterwards, never on a tree someone else is reading.

/// A node that owns its children
pub trait TreeNode: Sized {
    /// Identifier compared during lookup
    type Id: Copy + PartialEq;

    /// Returns the node's identifier
    fn id(&self) -> Self::Id;

    fn children(&self) -> &[Self];

    fn children_mut(&mut self) -> &mut Vec<Self>;

    /// Overwrite this node with `other` as part of a replace.
    ///
    /// Implementations decide what happens to the existing children.
    fn merge_from(&mut self, other: Self);
}

/// Find the first node with `target` id
pub fn find<N: TreeNode>(nodes: &[N], target: N::Id) -> Option<&N> {
    for node in nodes {
        if node.id() == target {
            return Some(node);
        }
        if let Some(found) = find(node.children(), target) {
            return Some(found);
        }
    }
    None
}

/// Find the first node with `target` id, mutably
pub fn find_mut<N: TreeNode>(nodes: &mut [N], target: N::Id) -> Option<&mut N> {
    for node in nodes.iter_mut() {
        if node.id() == target {
            return Some(node);
        }
        if let Some(found) = find_mut(node.children_mut(), target) {
            return Some(found);
        }
    }
    None
}

/// Merge `new_node` into the node with `target` id.
///
/// Returns whether a node matched; `new_node` is dropped otherwise.
pub fn find_replace<N: TreeNode>(nodes: &mut [N], target: N::Id, new_node: N) -> bool {
    match find_mut(nodes, target) {
        Some(node) => {
            node.merge_from(new_node);
            true
        }
        None => false,
    }
}

/// Append `child` as the last child of the node with `target` id
pub fn find_insert_child<N: TreeNode>(nodes: &mut [N], target: N::Id, child: N) -> bool {
    match find_mut(nodes, target) {
        Some(node) => {
            node.children_mut().push(child);
            true
        }
        None => false,
    }
}

/// Detach the node with `target` id, together with its subtree
pub fn find_remove<N: TreeNode>(nodes: &mut Vec<N>, target: N::Id) -> Option<N> {
    for i in 0..nodes.len() {
        if nodes[i].id() == target {
            return Some(nodes.remove(i));
        }
        if let Some(removed) = find_remove(nodes[i].children_mut(), target) {
            return Some(removed);
        }
    }
    None
}

/// Remove the node with `target` id; returns whether one was removed
pub fn find_delete<N: TreeNode>(nodes: &mut Vec<N>, target: N::Id) -> bool {
    find_remove(nodes, target).is_some()
}

/// Total number of nodes, at any depth
pub fn count<N: TreeNode>(nodes: &[N]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + count(node.children()))
        .sum()
}

/// Number of nodes whose id equals `target`
pub fn count_matching<N: TreeNode>(nodes: &[N], target: N::Id) -> usize {
    nodes
        .iter()
        .map(|node| {
            usize::from(node.id() == target) + count_matching(node.children(), target)
        })
        .sum()
}

/// Pre-order listing of every node with its depth.
///
/// Top-level nodes get `base_depth`; each level below adds one.
pub fn flatten<N: TreeNode>(nodes: &[N], base_depth: usize) -> Vec<(&N, usize)> {
    fn collect<'a, N: TreeNode>(nodes: &'a [N], depth: usize, out: &mut Vec<(&'a N, usize)>) {
        for node in nodes {
            out.push((node, depth));
            collect(node.children(), depth + 1, out);
        }
    }

    let mut out = Vec::with_capacity(count(nodes));
    collect(nodes, base_depth, &mut out);
    out
}
