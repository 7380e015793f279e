use homepage_categories::{
    CategoryId, CategorySnapshot, SaveRequest, SaveTarget,
};

/// Why a category listing was fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FetchPurpose {
    /// First hydration of the session.
    Initial,
    /// Refresh after a save round or a manual reload.
    Resync,
}

/// UI and completion events emitted to the category editor.
#[derive(Debug, Clone)]
pub(crate) enum CategoryEditorEvent {
    AddRoot,
    AddChild { parent_id: CategoryId },
    Edit { id: CategoryId },
    DraftChanged { id: CategoryId, value: String },
    Commit { id: CategoryId },
    Cancel { id: CategoryId },
    Delete { id: CategoryId },
    Save,
    Reload,
    /// A category listing request completed.
    Loaded {
        purpose: FetchPurpose,
        result: Result<Vec<CategorySnapshot>, String>,
    },
    /// A save request completed.
    SaveCompleted {
        target: SaveTarget,
        result: Result<(), String>,
    },
}

/// Effect events produced by the category editor reducer, routed outward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CategoryEditorEffect {
    /// Send one server write.
    Save(SaveRequest),
    /// Fetch the category forest.
    Fetch(FetchPurpose),
}
