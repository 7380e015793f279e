use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum depth of the category tree (roots plus one level of children).
pub const MAX_DEPTH: usize = 2;

/// Identifier of a category node.
///
/// Positive ids are assigned by the server. Negative ids are handed out
/// locally for nodes that were never persisted.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct CategoryId(i64);

impl CategoryId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether the server knows about this node.
    pub const fn is_persisted(self) -> bool {
        self.0 > 0
    }

    /// Whether the node only exists in the local edit buffer.
    pub const fn is_local(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CategoryId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// Server-provided category forest node used to hydrate the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySnapshot {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
    pub post_count: u64,
    #[serde(default)]
    pub children: Vec<CategorySnapshot>,
}

/// A category stored in the tree arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    pub(crate) id: CategoryId,
    pub(crate) name: String,
    pub(crate) parent_id: Option<CategoryId>,
    pub(crate) post_count: u64,
    pub(crate) children: Vec<CategoryId>,
}

impl CategoryNode {
    pub(crate) fn new(
        id: CategoryId,
        name: String,
        parent_id: Option<CategoryId>,
        post_count: u64,
    ) -> Self {
        Self {
            id,
            name,
            parent_id,
            post_count,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_id(&self) -> Option<CategoryId> {
        self.parent_id
    }

    /// Post count as reported by the server. Never adjusted locally.
    pub fn post_count(&self) -> u64 {
        self.post_count
    }

    pub fn children(&self) -> &[CategoryId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Flattened, render-ordered view of one node.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRow<'a> {
    /// Zero-based depth (`0` for roots).
    pub depth: usize,
    pub node: &'a CategoryNode,
}

/// Arena of category nodes with explicit root and child ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTree {
    nodes: HashMap<CategoryId, CategoryNode>,
    roots: Vec<CategoryId>,
}

impl CategoryTree {
    /// Build an arena from a server forest, keeping sibling order.
    pub fn from_snapshots(snapshots: Vec<CategorySnapshot>) -> Self {
        let mut tree = Self::default();
        for snapshot in snapshots {
            tree.insert_snapshot(snapshot, None);
        }
        tree
    }

    fn insert_snapshot(
        &mut self,
        snapshot: CategorySnapshot,
        parent_id: Option<CategoryId>,
    ) {
        let CategorySnapshot {
            id,
            name,
            post_count,
            children,
            ..
        } = snapshot;

        if self.nodes.contains_key(&id) {
            log::warn!("duplicate category id {id} in snapshot, skipping");
            return;
        }

        // The structural parent wins over the reported `parent_id`.
        let node = CategoryNode::new(id, name, parent_id, post_count);
        self.attach(node);
        for child in children {
            self.insert_snapshot(child, Some(id));
        }
    }

    fn attach(&mut self, node: CategoryNode) {
        let id = node.id;
        match node.parent_id {
            Some(parent_id) => {
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    parent.children.push(id);
                }
            },
            None => self.roots.push(id),
        }
        self.nodes.insert(id, node);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: CategoryId) -> Option<&CategoryNode> {
        self.nodes.get(&id)
    }

    pub(crate) fn get_mut(
        &mut self,
        id: CategoryId,
    ) -> Option<&mut CategoryNode> {
        self.nodes.get_mut(&id)
    }

    /// Root ids in display order.
    pub fn roots(&self) -> &[CategoryId] {
        &self.roots
    }

    /// Ids of the siblings set that would contain a child of `parent_id`.
    pub fn siblings(&self, parent_id: Option<CategoryId>) -> &[CategoryId] {
        match parent_id {
            Some(parent_id) => self
                .nodes
                .get(&parent_id)
                .map(|parent| parent.children.as_slice())
                .unwrap_or(&[]),
            None => &self.roots,
        }
    }

    /// Depth of a node (`0` for roots), or `None` when it is unknown.
    pub fn depth(&self, id: CategoryId) -> Option<usize> {
        let mut depth = 0;
        let mut current = self.nodes.get(&id)?;
        while let Some(parent_id) = current.parent_id {
            current = self.nodes.get(&parent_id)?;
            depth += 1;
        }
        Some(depth)
    }

    /// Whether another sibling under `parent_id` already uses `name`.
    ///
    /// Comparison is case-sensitive; `except` is ignored.
    pub fn sibling_name_taken(
        &self,
        parent_id: Option<CategoryId>,
        name: &str,
        except: CategoryId,
    ) -> bool {
        self.siblings(parent_id).iter().any(|sibling_id| {
            *sibling_id != except
                && self
                    .nodes
                    .get(sibling_id)
                    .is_some_and(|sibling| sibling.name == name)
        })
    }

    /// Append a node as the last child of its parent (or the last root).
    ///
    /// Returns `false` when the parent is unknown.
    pub(crate) fn insert(&mut self, node: CategoryNode) -> bool {
        if let Some(parent_id) = node.parent_id {
            if !self.nodes.contains_key(&parent_id) {
                return false;
            }
        }
        self.attach(node);
        true
    }

    /// Detach a leaf node from its parent (or the roots) and drop it.
    pub(crate) fn remove(&mut self, id: CategoryId) -> Option<CategoryNode> {
        let node = self.nodes.remove(&id)?;
        let siblings = match node.parent_id {
            Some(parent_id) => match self.nodes.get_mut(&parent_id) {
                Some(parent) => &mut parent.children,
                None => return Some(node),
            },
            None => &mut self.roots,
        };
        siblings.retain(|sibling| *sibling != id);
        Some(node)
    }

    /// Sum of root post counts. Roots already include their children.
    pub fn total_post_count(&self) -> u64 {
        self.roots
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .map(|node| node.post_count)
            .sum()
    }

    /// Depth-first rows in display order.
    pub fn rows(&self) -> Vec<CategoryRow<'_>> {
        let mut rows = Vec::with_capacity(self.nodes.len());
        for id in &self.roots {
            self.push_rows(*id, 0, &mut rows);
        }
        rows
    }

    fn push_rows<'a>(
        &'a self,
        id: CategoryId,
        depth: usize,
        rows: &mut Vec<CategoryRow<'a>>,
    ) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        rows.push(CategoryRow { depth, node });
        for child in &node.children {
            self.push_rows(*child, depth + 1, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(
        id: i64,
        name: &str,
        post_count: u64,
        children: Vec<CategorySnapshot>,
    ) -> CategorySnapshot {
        CategorySnapshot {
            id: CategoryId::new(id),
            name: name.to_owned(),
            parent_id: None,
            post_count,
            children,
        }
    }

    fn sample_tree() -> CategoryTree {
        CategoryTree::from_snapshots(vec![
            snapshot(
                1,
                "Dev",
                5,
                vec![
                    snapshot(3, "Rust", 4, vec![]),
                    snapshot(4, "Go", 1, vec![]),
                ],
            ),
            snapshot(2, "Life", 0, vec![]),
        ])
    }

    #[test]
    fn given_snapshot_forest_when_hydrated_then_order_and_parents_are_kept() {
        let tree = sample_tree();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.roots(), &[CategoryId::new(1), CategoryId::new(2)]);
        let dev = tree.get(CategoryId::new(1)).expect("root should exist");
        assert_eq!(dev.children(), &[CategoryId::new(3), CategoryId::new(4)]);
        let rust = tree.get(CategoryId::new(3)).expect("child should exist");
        assert_eq!(rust.parent_id(), Some(CategoryId::new(1)));
        assert_eq!(tree.depth(CategoryId::new(3)), Some(1));
    }

    #[test]
    fn given_tree_when_rows_requested_then_children_follow_their_root() {
        let tree = sample_tree();

        let rows: Vec<(usize, &str)> = tree
            .rows()
            .iter()
            .map(|row| (row.depth, row.node.name()))
            .collect();

        assert_eq!(
            rows,
            vec![(0, "Dev"), (1, "Rust"), (1, "Go"), (0, "Life")]
        );
    }

    #[test]
    fn given_sibling_names_when_checked_then_match_is_case_sensitive() {
        let tree = sample_tree();
        let dev = Some(CategoryId::new(1));

        assert!(tree.sibling_name_taken(dev, "Go", CategoryId::new(3)));
        assert!(!tree.sibling_name_taken(dev, "go", CategoryId::new(3)));
        assert!(!tree.sibling_name_taken(dev, "Go", CategoryId::new(4)));
        assert!(!tree.sibling_name_taken(None, "Go", CategoryId::new(3)));
    }

    #[test]
    fn given_root_counts_when_totalled_then_children_are_not_counted_twice() {
        assert_eq!(sample_tree().total_post_count(), 5);
    }

    #[test]
    fn given_child_when_removed_then_parent_list_is_updated() {
        let mut tree = sample_tree();

        let removed = tree.remove(CategoryId::new(3));

        assert!(removed.is_some());
        let dev = tree.get(CategoryId::new(1)).expect("root should exist");
        assert_eq!(dev.children(), &[CategoryId::new(4)]);
        assert!(!tree.contains(CategoryId::new(3)));
    }

    #[test]
    fn given_unknown_parent_when_inserting_then_node_is_rejected() {
        let mut tree = sample_tree();
        let node = CategoryNode::new(
            CategoryId::new(-1),
            String::new(),
            Some(CategoryId::new(99)),
            0,
        );

        assert!(!tree.insert(node));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn given_wire_json_when_deserialized_then_snapshot_is_built() {
        let json = serde_json::json!({
            "id": 1,
            "name": "Dev",
            "parent_id": null,
            "post_count": 2,
            "children": [
                { "id": 3, "name": "Rust", "parent_id": 1, "post_count": 2 }
            ]
        });

        let parsed: CategorySnapshot =
            serde_json::from_value(json).expect("should deserialize");

        assert_eq!(parsed.children.len(), 1);
        assert!(parsed.children[0].children.is_empty());
        assert!(parsed.id.is_persisted());
    }
}
