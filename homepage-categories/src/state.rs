use std::collections::{BTreeMap, BTreeSet};

use crate::model::{CategoryId, CategoryNode, CategorySnapshot, CategoryTree};

/// Kind of server write a pending id is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveKind {
    Create,
    Update,
    Delete,
}

/// Identifies one request of a save round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaveTarget {
    pub id: CategoryId,
    pub kind: SaveKind,
}

impl SaveTarget {
    pub fn new(id: CategoryId, kind: SaveKind) -> Self {
        Self { id, kind }
    }
}

/// A request that came back as failed during the last save round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFailure {
    pub target: SaveTarget,
    pub reason: String,
}

/// Ids awaiting a server write on the next save.
///
/// An id lives in at most one of the three sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChanges {
    pub(crate) adds: BTreeSet<CategoryId>,
    pub(crate) updates: BTreeSet<CategoryId>,
    pub(crate) deletes: BTreeSet<CategoryId>,
}

impl PendingChanges {
    pub fn adds(&self) -> &BTreeSet<CategoryId> {
        &self.adds
    }

    pub fn updates(&self) -> &BTreeSet<CategoryId> {
        &self.updates
    }

    pub fn deletes(&self) -> &BTreeSet<CategoryId> {
        &self.deletes
    }

    pub fn len(&self) -> usize {
        self.adds.len() + self.updates.len() + self.deletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adds.is_empty()
            && self.updates.is_empty()
            && self.deletes.is_empty()
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.kind_of(id).is_some()
    }

    /// Which set, if any, currently holds `id`.
    pub fn kind_of(&self, id: CategoryId) -> Option<SaveKind> {
        if self.adds.contains(&id) {
            Some(SaveKind::Create)
        } else if self.updates.contains(&id) {
            Some(SaveKind::Update)
        } else if self.deletes.contains(&id) {
            Some(SaveKind::Delete)
        } else {
            None
        }
    }

    pub(crate) fn resolve(&mut self, target: SaveTarget) -> bool {
        match target.kind {
            SaveKind::Create => self.adds.remove(&target.id),
            SaveKind::Update => self.updates.remove(&target.id),
            SaveKind::Delete => self.deletes.remove(&target.id),
        }
    }
}

/// Category tree edit buffer.
///
/// Hydrated once from a server snapshot and then mutated only through
/// [`crate::reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub(crate) initialized: bool,
    pub(crate) tree: CategoryTree,
    pub(crate) pending: PendingChanges,
    pub(crate) editing: BTreeSet<CategoryId>,
    pub(crate) next_local_id: i64,
    pub(crate) in_flight: BTreeMap<CategoryId, SaveKind>,
    pub(crate) failures: Vec<SaveFailure>,
    pub(crate) awaiting_resync: BTreeSet<CategoryId>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            initialized: false,
            tree: CategoryTree::default(),
            pending: PendingChanges::default(),
            editing: BTreeSet::new(),
            next_local_id: -1,
            in_flight: BTreeMap::new(),
            failures: Vec::new(),
            awaiting_resync: BTreeSet::new(),
        }
    }
}

impl EditorState {
    // --- Read access ---

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    pub fn node(&self, id: CategoryId) -> Option<&CategoryNode> {
        self.tree.get(id)
    }

    pub fn pending(&self) -> &PendingChanges {
        &self.pending
    }

    pub fn editing(&self) -> &BTreeSet<CategoryId> {
        &self.editing
    }

    pub fn is_editing(&self, id: CategoryId) -> bool {
        self.editing.contains(&id)
    }

    /// True iff any pending set is non-empty.
    pub fn save_enabled(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn next_local_id(&self) -> CategoryId {
        CategoryId::new(self.next_local_id)
    }

    pub fn is_saving(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn in_flight(&self) -> &BTreeMap<CategoryId, SaveKind> {
        &self.in_flight
    }

    /// Failures reported by the most recent save round.
    pub fn failures(&self) -> &[SaveFailure] {
        &self.failures
    }

    /// Whether a local node was created on the server and still carries its
    /// local id.
    pub fn is_awaiting_resync(&self, id: CategoryId) -> bool {
        self.awaiting_resync.contains(&id)
    }

    /// No pending writes, open edits or requests in flight.
    pub fn is_clean(&self) -> bool {
        self.pending.is_empty()
            && self.editing.is_empty()
            && self.in_flight.is_empty()
    }

    /// Whether a fresh server tree may replace the local one.
    ///
    /// Besides a clean buffer, this allows pending creates whose parent was
    /// created in an earlier round; they are carried over to the new tree.
    pub fn can_resync(&self) -> bool {
        self.editing.is_empty()
            && self.in_flight.is_empty()
            && self.pending.updates.is_empty()
            && self.pending.deletes.is_empty()
            && self.pending.adds.iter().all(|id| self.has_created_parent(*id))
    }

    /// Whether `id` sits under a parent that is awaiting a resync.
    pub fn has_created_parent(&self, id: CategoryId) -> bool {
        self.tree
            .get(id)
            .and_then(|node| node.parent_id)
            .is_some_and(|parent_id| self.awaiting_resync.contains(&parent_id))
    }

    // --- Write access ---

    pub(crate) fn hydrate(&mut self, snapshots: Vec<CategorySnapshot>) {
        self.tree = CategoryTree::from_snapshots(snapshots);
        self.initialized = true;
    }

    pub(crate) fn begin_edit(&mut self, id: CategoryId) {
        self.editing.insert(id);
    }

    pub(crate) fn end_edit(&mut self, id: CategoryId) {
        self.editing.remove(&id);
    }

    pub(crate) fn allocate_local_id(&mut self) -> CategoryId {
        let id = CategoryId::new(self.next_local_id);
        self.next_local_id -= 1;
        id
    }
}
