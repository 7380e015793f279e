use crate::command::CategoryCommand;
use crate::errors::CategoryError;
use crate::event::{CategoryEffect, SaveRequest};
use crate::model::{CategoryId, CategoryNode, CategorySnapshot, MAX_DEPTH};
use crate::state::{EditorState, SaveFailure, SaveKind, SaveTarget};

/// Effects emitted by one reducer step.
pub type Effects = Vec<CategoryEffect>;

/// Reduce a category command into state updates and effects.
///
/// An `Err` leaves `state` untouched.
pub fn reduce(
    state: &mut EditorState,
    command: CategoryCommand,
) -> Result<Effects, CategoryError> {
    use CategoryCommand::*;

    match command {
        Initialize(snapshots) => {
            reduce_initialize(state, snapshots);
            Ok(Effects::new())
        },
        BeginEdit { id } => {
            ensure_idle(state)?;
            if !state.tree.contains(id) {
                log::warn!("begin edit ignored: category {id} not found");
                return Ok(Effects::new());
            }
            state.begin_edit(id);
            Ok(Effects::new())
        },
        EndEdit { id } => {
            state.end_edit(id);
            Ok(Effects::new())
        },
        Add { parent_id } => {
            ensure_idle(state)?;
            if let Some(parent_id) = parent_id {
                ensure_synced(state, parent_id)?;
            }
            reduce_add(state, parent_id);
            Ok(Effects::new())
        },
        ResetEdit {
            id,
            name,
            parent_id,
        } => match name {
            Some(_) => {
                state.end_edit(id);
                Ok(Effects::new())
            },
            None => reduce_delete(state, id, parent_id),
        },
        CommitRename {
            id,
            name,
            parent_id,
        } => reduce_commit_rename(state, id, &name, parent_id),
        Delete { id, parent_id } => reduce_delete(state, id, parent_id),
        ApplySave => reduce_apply_save(state),
        SaveSucceeded(target) => Ok(reduce_save_succeeded(state, target)),
        SaveFailed { target, reason } => {
            Ok(reduce_save_failed(state, target, reason))
        },
        Resync(snapshots) => {
            if !state.can_resync() {
                return Err(CategoryError::UnsavedChanges);
            }
            reduce_resync(state, snapshots);
            Ok(Effects::new())
        },
    }
}

fn ensure_idle(state: &EditorState) -> Result<(), CategoryError> {
    if state.is_saving() {
        return Err(CategoryError::SaveInProgress);
    }
    Ok(())
}

fn ensure_synced(
    state: &EditorState,
    id: CategoryId,
) -> Result<(), CategoryError> {
    if state.is_awaiting_resync(id) {
        return Err(CategoryError::ResyncRequired { id });
    }
    Ok(())
}

fn reduce_initialize(
    state: &mut EditorState,
    snapshots: Vec<CategorySnapshot>,
) {
    if state.initialized {
        log::debug!("category tree already initialized, ignoring snapshot");
        return;
    }
    state.hydrate(snapshots);
    log::info!("category tree initialized with {} nodes", state.tree.len());
}

/// Replace the tree with a fresh server listing.
///
/// Pending creates under a parent created in an earlier round are moved
/// under the root that now carries the parent's name.
fn reduce_resync(state: &mut EditorState, snapshots: Vec<CategorySnapshot>) {
    // Local ids count down, so reverse order is creation order.
    let carried: Vec<(CategoryNode, String)> = state
        .pending
        .adds
        .iter()
        .rev()
        .filter_map(|id| {
            let node = state.tree.get(*id)?;
            let parent = state.tree.get(node.parent_id?)?;
            Some((node.clone(), parent.name.clone()))
        })
        .collect();

    state.hydrate(snapshots);
    state.pending.adds.clear();
    state.awaiting_resync.clear();
    state.failures.clear();

    for (mut node, parent_name) in carried {
        let id = node.id;
        let parent_id = state.tree.roots().iter().copied().find(|root| {
            state
                .tree
                .get(*root)
                .is_some_and(|candidate| candidate.name == parent_name)
        });
        let Some(parent_id) = parent_id else {
            log::warn!(
                "dropping category {id}: parent {parent_name:?} is not on \
                 the server"
            );
            continue;
        };
        if state
            .tree
            .sibling_name_taken(Some(parent_id), &node.name, id)
        {
            log::warn!(
                "dropping category {id}: {:?} already exists under {parent_id}",
                node.name
            );
            continue;
        }
        node.parent_id = Some(parent_id);
        node.children.clear();
        state.tree.insert(node);
        state.pending.adds.insert(id);
        log::debug!("category {id} now pending under {parent_id}");
    }
}

fn reduce_add(state: &mut EditorState, parent_id: Option<CategoryId>) {
    if let Some(parent_id) = parent_id {
        let Some(depth) = state.tree.depth(parent_id) else {
            log::warn!("add ignored: parent category {parent_id} not found");
            return;
        };
        if depth + 1 >= MAX_DEPTH {
            log::warn!("add ignored: category {parent_id} is not a root");
            return;
        }
    }

    let id = state.allocate_local_id();
    let node = CategoryNode::new(id, String::new(), parent_id, 0);
    state.tree.insert(node);
    state.pending.adds.insert(id);
    state.begin_edit(id);
}

fn reduce_commit_rename(
    state: &mut EditorState,
    id: CategoryId,
    name: &str,
    parent_id: Option<CategoryId>,
) -> Result<Effects, CategoryError> {
    ensure_idle(state)?;
    // The trimmed name is both compared and stored.
    let name = name.trim();
    if name.is_empty() {
        return Err(CategoryError::EmptyName);
    }
    if state.tree.sibling_name_taken(parent_id, name, id) {
        return Err(CategoryError::NameCollision {
            name: name.to_string(),
        });
    }
    ensure_synced(state, id)?;

    let Some(node) = state.tree.get_mut(id) else {
        log::warn!("rename ignored: category {id} not found");
        return Ok(Effects::new());
    };
    let unchanged = node.name == name;
    node.name = name.to_string();

    if id.is_persisted() && !unchanged {
        state.pending.updates.insert(id);
    }
    state.end_edit(id);
    Ok(Effects::new())
}

fn reduce_delete(
    state: &mut EditorState,
    id: CategoryId,
    parent_id: Option<CategoryId>,
) -> Result<Effects, CategoryError> {
    ensure_idle(state)?;
    let Some(node) = state.tree.get(id) else {
        log::warn!("delete ignored: category {id} not found");
        return Ok(Effects::new());
    };
    if node.parent_id != parent_id {
        log::warn!(
            "delete ignored: category {id} is not a child of {parent_id:?}"
        );
        return Ok(Effects::new());
    }
    if node.post_count != 0 {
        return Err(CategoryError::NonEmptyCategoryDeletion {
            id,
            post_count: node.post_count,
        });
    }
    if !node.children.is_empty() {
        return Err(CategoryError::HasChildren { id });
    }
    ensure_synced(state, id)?;

    state.tree.remove(id);
    if id.is_local() {
        state.pending.adds.remove(&id);
    } else {
        state.pending.updates.remove(&id);
        state.pending.deletes.insert(id);
    }
    state.end_edit(id);
    Ok(Effects::new())
}

fn reduce_apply_save(
    state: &mut EditorState,
) -> Result<Effects, CategoryError> {
    if !state.save_enabled() {
        return Ok(Effects::new());
    }
    if !state.editing.is_empty() {
        return Err(CategoryError::EditsInProgress {
            count: state.editing.len(),
        });
    }
    ensure_idle(state)?;

    let mut requests = Vec::with_capacity(state.pending.len());
    for id in &state.pending.deletes {
        requests.push(SaveRequest::Delete { id: *id });
    }
    for id in &state.pending.updates {
        let Some(node) = state.tree.get(*id) else {
            log::warn!("pending update for missing category {id}");
            continue;
        };
        requests.push(SaveRequest::Update {
            id: *id,
            name: node.name.clone(),
            parent_id: node.parent_id,
        });
    }
    // Local ids count down, so reverse order is creation order.
    for id in state.pending.adds.iter().rev() {
        let Some(node) = state.tree.get(*id) else {
            log::warn!("pending add for missing category {id}");
            continue;
        };
        if let Some(parent_id) = node.parent_id.filter(|p| p.is_local()) {
            log::warn!(
                "category {id} is created under unsaved parent {parent_id}; \
                 the server cannot resolve a local parent id"
            );
        }
        requests.push(SaveRequest::Create {
            local_id: *id,
            name: node.name.clone(),
            parent_id: node.parent_id,
        });
    }

    state.failures.clear();
    for request in &requests {
        let target = request.target();
        state.in_flight.insert(target.id, target.kind);
    }
    log::info!("saving {} category changes", requests.len());

    Ok(requests.into_iter().map(CategoryEffect::Request).collect())
}

fn reduce_save_succeeded(
    state: &mut EditorState,
    target: SaveTarget,
) -> Effects {
    if !take_in_flight(state, target) {
        return Effects::new();
    }
    state.pending.resolve(target);
    if target.kind == SaveKind::Create {
        state.awaiting_resync.insert(target.id);
    }
    finish_round(state)
}

fn reduce_save_failed(
    state: &mut EditorState,
    target: SaveTarget,
    reason: String,
) -> Effects {
    if !take_in_flight(state, target) {
        return Effects::new();
    }
    log::warn!(
        "saving category {} ({:?}) failed: {reason}",
        target.id,
        target.kind
    );
    state.failures.push(SaveFailure { target, reason });
    finish_round(state)
}

fn take_in_flight(state: &mut EditorState, target: SaveTarget) -> bool {
    if state.in_flight.get(&target.id) != Some(&target.kind) {
        log::debug!(
            "ignoring completion for category {} ({:?}): not in flight",
            target.id,
            target.kind
        );
        return false;
    }
    state.in_flight.remove(&target.id);
    true
}

fn finish_round(state: &mut EditorState) -> Effects {
    if !state.in_flight.is_empty() {
        return Effects::new();
    }

    let failed = state.failures.len();
    let mut effects = vec![CategoryEffect::SaveRoundFinished { failed }];
    if !state.awaiting_resync.is_empty() && state.can_resync() {
        effects.push(CategoryEffect::ResyncRequested);
    }
    effects
}
