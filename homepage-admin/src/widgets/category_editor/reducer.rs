use homepage_categories::{
    CategoryCommand, CategoryEffect, CategoryError, CategoryId, Effects,
};
use iced::Task;

use super::command::CategoryEditorCommand;
use super::event::{CategoryEditorEffect, FetchPurpose};
use super::state::CategoryEditorState;

/// Reduce a category editor command into state updates and effect tasks.
pub(crate) fn reduce(
    state: &mut CategoryEditorState,
    command: CategoryEditorCommand,
) -> Task<CategoryEditorEffect> {
    let effects = apply(state, command);
    Task::batch(effects.into_iter().map(Task::done))
}

pub(super) fn apply(
    state: &mut CategoryEditorState,
    command: CategoryEditorCommand,
) -> Vec<CategoryEditorEffect> {
    use CategoryEditorCommand::*;

    match command {
        AddRoot => {
            add(state, None);
            Vec::new()
        },
        AddChild { parent_id } => {
            add(state, Some(parent_id));
            Vec::new()
        },
        Edit { id } => {
            begin_edit(state, id);
            Vec::new()
        },
        DraftChanged { id, value } => {
            if state.editor().is_editing(id) {
                state.set_draft(id, value);
            }
            Vec::new()
        },
        Commit { id } => {
            commit(state, id);
            Vec::new()
        },
        Cancel { id } => {
            cancel(state, id);
            Vec::new()
        },
        Delete { id } => {
            delete(state, id);
            Vec::new()
        },
        Save => save(state),
        Reload => reload(state),
        LoadCompleted { purpose, snapshots } => {
            state.set_loading(false);
            let (command, resync) = match purpose {
                FetchPurpose::Initial => {
                    (CategoryCommand::Initialize(snapshots), false)
                },
                FetchPurpose::Resync => {
                    (CategoryCommand::Resync(snapshots), true)
                },
            };
            if run(state, command).is_some() && resync {
                state.clear_drafts();
            }
            Vec::new()
        },
        LoadFailed { message, .. } => {
            state.set_loading(false);
            state.show_error(format!("Failed to load categories: {message}"));
            Vec::new()
        },
        SaveSucceeded(target) => {
            match run(state, CategoryCommand::SaveSucceeded(target)) {
                Some(effects) => map_core_effects(state, effects),
                None => Vec::new(),
            }
        },
        SaveFailed { target, message } => {
            let command = CategoryCommand::SaveFailed {
                target,
                reason: message,
            };
            match run(state, command) {
                Some(effects) => map_core_effects(state, effects),
                None => Vec::new(),
            }
        },
    }
}

/// Run a core command, surfacing a rejection in the banner.
fn run(
    state: &mut CategoryEditorState,
    command: CategoryCommand,
) -> Option<Effects> {
    match homepage_categories::reduce(state.editor_mut(), command) {
        Ok(effects) => Some(effects),
        Err(err) => {
            state.show_error(err.to_string());
            None
        },
    }
}

fn add(state: &mut CategoryEditorState, parent_id: Option<CategoryId>) {
    let id = state.editor().next_local_id();
    if run(state, CategoryCommand::Add { parent_id }).is_none() {
        return;
    }
    if state.editor().tree().contains(id) {
        state.set_draft(id, String::new());
        state.clear_banner();
    }
}

fn begin_edit(state: &mut CategoryEditorState, id: CategoryId) {
    if run(state, CategoryCommand::BeginEdit { id }).is_none() {
        return;
    }
    let Some(name) = state.editor().node(id).map(|n| n.name().to_string())
    else {
        return;
    };
    state.set_draft(id, name);
}

fn commit(state: &mut CategoryEditorState, id: CategoryId) {
    let Some(node) = state.editor().node(id) else {
        return;
    };
    let name = state.draft(id).unwrap_or(node.name()).to_string();
    let parent_id = node.parent_id();

    let command = CategoryCommand::CommitRename {
        id,
        name,
        parent_id,
    };
    if run(state, command).is_some() {
        state.clear_draft(id);
        state.clear_banner();
    }
}

fn cancel(state: &mut CategoryEditorState, id: CategoryId) {
    let Some((name, parent_id)) = state
        .editor()
        .node(id)
        .map(|node| (node.name().to_string(), node.parent_id()))
    else {
        state.clear_draft(id);
        return;
    };
    // A node that never got a name was added in this edit.
    let name = (!name.is_empty()).then_some(name);

    let command = CategoryCommand::ResetEdit {
        id,
        name,
        parent_id,
    };
    if run(state, command).is_some() {
        state.clear_draft(id);
    }
}

fn delete(state: &mut CategoryEditorState, id: CategoryId) {
    let Some(parent_id) = state.editor().node(id).map(|n| n.parent_id())
    else {
        return;
    };
    if run(state, CategoryCommand::Delete { id, parent_id }).is_some() {
        state.clear_draft(id);
    }
}

fn save(state: &mut CategoryEditorState) -> Vec<CategoryEditorEffect> {
    let Some(effects) = run(state, CategoryCommand::ApplySave) else {
        return Vec::new();
    };
    if !effects.is_empty() {
        state.show_info(format!("Saving {} changes...", effects.len()));
    }
    map_core_effects(state, effects)
}

fn reload(state: &mut CategoryEditorState) -> Vec<CategoryEditorEffect> {
    if !state.editor().is_initialized() {
        state.set_loading(true);
        return vec![CategoryEditorEffect::Fetch(FetchPurpose::Initial)];
    }
    if !state.editor().can_resync() {
        state.show_error(CategoryError::UnsavedChanges.to_string());
        return Vec::new();
    }
    state.set_loading(true);
    vec![CategoryEditorEffect::Fetch(FetchPurpose::Resync)]
}

fn map_core_effects(
    state: &mut CategoryEditorState,
    effects: Effects,
) -> Vec<CategoryEditorEffect> {
    let mut mapped = Vec::with_capacity(effects.len());
    for effect in effects {
        match effect {
            CategoryEffect::Request(request) => {
                mapped.push(CategoryEditorEffect::Save(request));
            },
            CategoryEffect::SaveRoundFinished { failed: 0 } => {
                state.show_info("All changes saved.");
            },
            CategoryEffect::SaveRoundFinished { failed } => {
                let reason = state
                    .editor()
                    .failures()
                    .first()
                    .map(|failure| failure.reason.clone())
                    .unwrap_or_default();
                state.show_error(format!(
                    "{failed} changes failed to save: {reason}"
                ));
            },
            CategoryEffect::ResyncRequested => {
                state.set_loading(true);
                mapped.push(CategoryEditorEffect::Fetch(FetchPurpose::Resync));
            },
        }
    }
    mapped
}

#[cfg(test)]
mod tests {
    use homepage_categories::{
        CategorySnapshot, SaveKind, SaveRequest, SaveTarget,
    };

    use super::*;
    use crate::widgets::category_editor::state::BannerKind;

    fn id(raw: i64) -> CategoryId {
        CategoryId::new(raw)
    }

    fn root(raw: i64, name: &str, post_count: u64) -> CategorySnapshot {
        CategorySnapshot {
            id: id(raw),
            name: name.to_owned(),
            parent_id: None,
            post_count,
            children: Vec::new(),
        }
    }

    fn loaded_state(snapshots: Vec<CategorySnapshot>) -> CategoryEditorState {
        let mut state = CategoryEditorState::default();
        apply(
            &mut state,
            CategoryEditorCommand::LoadCompleted {
                purpose: FetchPurpose::Initial,
                snapshots,
            },
        );
        state
    }

    fn banner_kind(state: &CategoryEditorState) -> Option<BannerKind> {
        state.banner().map(|banner| banner.kind)
    }

    #[test]
    fn given_unloaded_editor_when_reload_then_initial_fetch_is_requested() {
        let mut state = CategoryEditorState::default();

        let effects = apply(&mut state, CategoryEditorCommand::Reload);

        assert_eq!(
            effects,
            vec![CategoryEditorEffect::Fetch(FetchPurpose::Initial)]
        );
        assert!(state.is_loading());
    }

    #[test]
    fn given_new_root_when_draft_committed_then_name_is_stored() {
        let mut state = loaded_state(Vec::new());

        apply(&mut state, CategoryEditorCommand::AddRoot);
        assert_eq!(state.draft(id(-1)), Some(""));

        apply(
            &mut state,
            CategoryEditorCommand::DraftChanged {
                id: id(-1),
                value: String::from("Tech"),
            },
        );
        apply(&mut state, CategoryEditorCommand::Commit { id: id(-1) });

        let node = state.editor().node(id(-1)).expect("node should exist");
        assert_eq!(node.name(), "Tech");
        assert_eq!(state.draft(id(-1)), None);
        assert!(state.editor().editing().is_empty());
    }

    #[test]
    fn given_blank_draft_when_committed_then_error_banner_is_shown() {
        let mut state = loaded_state(Vec::new());
        apply(&mut state, CategoryEditorCommand::AddRoot);

        apply(&mut state, CategoryEditorCommand::Commit { id: id(-1) });

        assert_eq!(banner_kind(&state), Some(BannerKind::Error));
        assert!(state.editor().is_editing(id(-1)));
        assert_eq!(state.draft(id(-1)), Some(""));
    }

    #[test]
    fn given_renamed_draft_when_cancelled_then_stored_name_is_kept() {
        let mut state = loaded_state(vec![root(5, "Old", 0)]);
        apply(&mut state, CategoryEditorCommand::Edit { id: id(5) });
        assert_eq!(state.draft(id(5)), Some("Old"));
        apply(
            &mut state,
            CategoryEditorCommand::DraftChanged {
                id: id(5),
                value: String::from("Draft"),
            },
        );

        apply(&mut state, CategoryEditorCommand::Cancel { id: id(5) });

        let node = state.editor().node(id(5)).expect("node should exist");
        assert_eq!(node.name(), "Old");
        assert_eq!(state.draft(id(5)), None);
        assert!(state.editor().pending().is_empty());
    }

    #[test]
    fn given_new_node_when_cancelled_then_it_is_removed() {
        let mut state = loaded_state(Vec::new());
        apply(&mut state, CategoryEditorCommand::AddRoot);

        apply(&mut state, CategoryEditorCommand::Cancel { id: id(-1) });

        assert!(state.editor().tree().is_empty());
        assert!(state.editor().is_clean());
    }

    #[test]
    fn given_category_with_posts_when_deleted_then_error_banner_is_shown() {
        let mut state = loaded_state(vec![root(7, "Busy", 3)]);

        apply(&mut state, CategoryEditorCommand::Delete { id: id(7) });

        assert!(state.editor().tree().contains(id(7)));
        assert_eq!(banner_kind(&state), Some(BannerKind::Error));
    }

    #[test]
    fn given_pending_rename_when_saved_then_request_effect_is_emitted() {
        let mut state = loaded_state(vec![root(5, "Old", 0)]);
        apply(&mut state, CategoryEditorCommand::Edit { id: id(5) });
        apply(
            &mut state,
            CategoryEditorCommand::DraftChanged {
                id: id(5),
                value: String::from("New"),
            },
        );
        apply(&mut state, CategoryEditorCommand::Commit { id: id(5) });

        let effects = apply(&mut state, CategoryEditorCommand::Save);

        assert_eq!(
            effects,
            vec![CategoryEditorEffect::Save(SaveRequest::Update {
                id: id(5),
                name: String::from("New"),
                parent_id: None,
            })]
        );
        assert_eq!(banner_kind(&state), Some(BannerKind::Info));
    }

    #[test]
    fn given_created_node_when_save_succeeds_then_resync_fetch_follows() {
        let mut state = loaded_state(Vec::new());
        apply(&mut state, CategoryEditorCommand::AddRoot);
        apply(
            &mut state,
            CategoryEditorCommand::DraftChanged {
                id: id(-1),
                value: String::from("Tech"),
            },
        );
        apply(&mut state, CategoryEditorCommand::Commit { id: id(-1) });
        apply(&mut state, CategoryEditorCommand::Save);

        let effects = apply(
            &mut state,
            CategoryEditorCommand::SaveSucceeded(SaveTarget::new(
                id(-1),
                SaveKind::Create,
            )),
        );

        assert_eq!(
            effects,
            vec![CategoryEditorEffect::Fetch(FetchPurpose::Resync)]
        );
        assert!(state.is_loading());

        apply(
            &mut state,
            CategoryEditorCommand::LoadCompleted {
                purpose: FetchPurpose::Resync,
                snapshots: vec![root(9, "Tech", 0)],
            },
        );

        assert!(!state.is_loading());
        assert_eq!(state.editor().tree().roots(), &[id(9)]);
    }

    #[test]
    fn given_failed_save_then_error_banner_names_the_reason() {
        let mut state = loaded_state(vec![root(5, "Old", 0)]);
        apply(&mut state, CategoryEditorCommand::Delete { id: id(5) });
        apply(&mut state, CategoryEditorCommand::Save);

        apply(
            &mut state,
            CategoryEditorCommand::SaveFailed {
                target: SaveTarget::new(id(5), SaveKind::Delete),
                message: String::from("timeout"),
            },
        );

        let banner = state.banner().expect("banner should be shown");
        assert_eq!(banner.kind, BannerKind::Error);
        assert!(banner.message.contains("timeout"));
        assert!(state.editor().save_enabled());
    }

    #[test]
    fn given_unsaved_changes_when_reload_then_no_fetch_is_requested() {
        let mut state = loaded_state(vec![root(5, "Old", 0)]);
        apply(&mut state, CategoryEditorCommand::Delete { id: id(5) });

        let effects = apply(&mut state, CategoryEditorCommand::Reload);

        assert!(effects.is_empty());
        assert_eq!(banner_kind(&state), Some(BannerKind::Error));
        assert!(!state.is_loading());
    }

    #[test]
    fn given_load_failure_then_loading_stops_with_error_banner() {
        let mut state = CategoryEditorState::default();
        apply(&mut state, CategoryEditorCommand::Reload);

        apply(
            &mut state,
            CategoryEditorCommand::LoadFailed {
                purpose: FetchPurpose::Initial,
                message: String::from("connection refused"),
            },
        );

        assert!(!state.is_loading());
        assert!(!state.editor().is_initialized());
        assert_eq!(banner_kind(&state), Some(BannerKind::Error));
    }
}
