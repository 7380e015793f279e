use std::collections::HashMap;

use homepage_categories::{CategoryId, EditorState};

/// Severity of the status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BannerKind {
    Info,
    Error,
}

/// Message shown above the category list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Banner {
    pub(crate) kind: BannerKind,
    pub(crate) message: String,
}

/// UI state of the category editor: core edit buffer plus input drafts.
#[derive(Debug, Default)]
pub(crate) struct CategoryEditorState {
    editor: EditorState,
    drafts: HashMap<CategoryId, String>,
    banner: Option<Banner>,
    loading: bool,
}

impl CategoryEditorState {
    // --- Read access ---

    pub(crate) fn editor(&self) -> &EditorState {
        &self.editor
    }

    /// Return the text input value for a node in edit mode.
    pub(crate) fn draft(&self, id: CategoryId) -> Option<&str> {
        self.drafts.get(&id).map(String::as_str)
    }

    pub(crate) fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.loading
    }

    // --- Write access ---

    pub(crate) fn editor_mut(&mut self) -> &mut EditorState {
        &mut self.editor
    }

    pub(crate) fn set_draft(&mut self, id: CategoryId, value: String) {
        self.drafts.insert(id, value);
    }

    pub(crate) fn clear_draft(&mut self, id: CategoryId) {
        self.drafts.remove(&id);
    }

    pub(crate) fn clear_drafts(&mut self) {
        self.drafts.clear();
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub(crate) fn show_info(&mut self, message: impl Into<String>) {
        self.banner = Some(Banner {
            kind: BannerKind::Info,
            message: message.into(),
        });
    }

    pub(crate) fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("category editor: {message}");
        self.banner = Some(Banner {
            kind: BannerKind::Error,
            message,
        });
    }

    pub(crate) fn clear_banner(&mut self) {
        self.banner = None;
    }
}
