use homepage_categories::{CategoryId, CategorySnapshot, SaveTarget};

use super::event::FetchPurpose;

/// Commands accepted by the category editor widget reducer.
#[derive(Debug, Clone)]
pub(crate) enum CategoryEditorCommand {
    AddRoot,
    AddChild {
        parent_id: CategoryId,
    },
    Edit {
        id: CategoryId,
    },
    DraftChanged {
        id: CategoryId,
        value: String,
    },
    Commit {
        id: CategoryId,
    },
    Cancel {
        id: CategoryId,
    },
    Delete {
        id: CategoryId,
    },
    Save,
    Reload,
    LoadCompleted {
        purpose: FetchPurpose,
        snapshots: Vec<CategorySnapshot>,
    },
    LoadFailed {
        purpose: FetchPurpose,
        message: String,
    },
    SaveSucceeded(SaveTarget),
    SaveFailed {
        target: SaveTarget,
        message: String,
    },
}
