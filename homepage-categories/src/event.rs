use crate::model::CategoryId;
use crate::state::{SaveKind, SaveTarget};

/// A server write produced by a save round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create {
        local_id: CategoryId,
        name: String,
        parent_id: Option<CategoryId>,
    },
    Update {
        id: CategoryId,
        name: String,
        parent_id: Option<CategoryId>,
    },
    Delete {
        id: CategoryId,
    },
}

impl SaveRequest {
    /// Completion key used to fold the response back into the editor.
    pub fn target(&self) -> SaveTarget {
        match self {
            SaveRequest::Create { local_id, .. } => {
                SaveTarget::new(*local_id, SaveKind::Create)
            },
            SaveRequest::Update { id, .. } => {
                SaveTarget::new(*id, SaveKind::Update)
            },
            SaveRequest::Delete { id } => {
                SaveTarget::new(*id, SaveKind::Delete)
            },
        }
    }
}

/// Effects produced by the category editor reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryEffect {
    /// Issue a server write and report back with a completion command.
    Request(SaveRequest),
    /// Every request of the current round has completed.
    SaveRoundFinished { failed: usize },
    /// Created nodes still carry local ids; fetch the tree again.
    ResyncRequested,
}
