use crate::model::{CategoryId, CategorySnapshot};
use crate::state::SaveTarget;

/// Commands dispatched to the category editor reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryCommand {
    /// One-time hydration from the server forest.
    Initialize(Vec<CategorySnapshot>),
    /// Open a node for editing.
    BeginEdit { id: CategoryId },
    /// Close a node's edit mode.
    EndEdit { id: CategoryId },
    /// Create a provisional node under `parent_id` (or as a root).
    Add { parent_id: Option<CategoryId> },
    /// Cancel an edit. `name` is present when the node existed before the
    /// edit started; absent for a freshly added node.
    ResetEdit {
        id: CategoryId,
        name: Option<String>,
        parent_id: Option<CategoryId>,
    },
    /// Commit a node's name.
    CommitRename {
        id: CategoryId,
        name: String,
        parent_id: Option<CategoryId>,
    },
    /// Remove a node.
    Delete {
        id: CategoryId,
        parent_id: Option<CategoryId>,
    },
    /// Emit server writes for every pending id.
    ApplySave,
    /// A save request completed.
    SaveSucceeded(SaveTarget),
    /// A save request failed; the id stays pending.
    SaveFailed { target: SaveTarget, reason: String },
    /// Replace the tree with a fresh server forest once nothing is pending.
    Resync(Vec<CategorySnapshot>),
}
