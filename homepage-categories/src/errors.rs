use thiserror::Error;

use crate::model::CategoryId;

/// Validation failures reported by the category editor.
///
/// Every variant is raised before any mutation, so the editor state is left
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("Category name must not be empty.")]
    EmptyName,
    #[error("A sibling category named \"{name}\" already exists.")]
    NameCollision { name: String },
    #[error("Category {id} has {post_count} posts and cannot be deleted.")]
    NonEmptyCategoryDeletion { id: CategoryId, post_count: u64 },
    #[error("Category {id} still has child categories.")]
    HasChildren { id: CategoryId },
    #[error("Finish or cancel {count} open edits before saving.")]
    EditsInProgress { count: usize },
    #[error("A save is already in progress.")]
    SaveInProgress,
    #[error("Save or discard local changes before reloading.")]
    UnsavedChanges,
    #[error("Category {id} was just created; reload before editing it.")]
    ResyncRequired { id: CategoryId },
}
