pub(crate) mod command;
pub(crate) mod event;
pub(crate) mod reducer;
pub(crate) mod state;
pub(crate) mod view;

pub(crate) use command::CategoryEditorCommand;
pub(crate) use event::{
    CategoryEditorEffect, CategoryEditorEvent, FetchPurpose,
};
use homepage_categories::{CategoryId, CategoryRow, EditorState};
use iced::Task;
use state::{Banner, CategoryEditorState};

/// Read-only data the category list view renders from.
pub(crate) struct CategoryEditorViewModel<'a> {
    pub(crate) editor: &'a EditorState,
    pub(crate) rows: Vec<CategoryRow<'a>>,
    pub(crate) banner: Option<&'a Banner>,
    pub(crate) loading: bool,
    pub(crate) total_posts: u64,
    state: &'a CategoryEditorState,
}

impl<'a> CategoryEditorViewModel<'a> {
    /// Return the input value for a row in edit mode.
    pub(crate) fn draft(&self, id: CategoryId) -> Option<&'a str> {
        self.state.draft(id)
    }
}

/// Category editor widget: the blog's category tree with inline editing
/// and a batched save.
#[derive(Default)]
pub(crate) struct CategoryEditorWidget {
    state: CategoryEditorState,
}

impl CategoryEditorWidget {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reduce a command into state updates and effects.
    pub(crate) fn reduce(
        &mut self,
        command: CategoryEditorCommand,
    ) -> Task<CategoryEditorEffect> {
        reducer::reduce(&mut self.state, command)
    }

    /// Return a read-only view model for the category list.
    pub(crate) fn vm(&self) -> CategoryEditorViewModel<'_> {
        let editor = self.state.editor();
        CategoryEditorViewModel {
            editor,
            rows: editor.tree().rows(),
            banner: self.state.banner(),
            loading: self.state.is_loading(),
            total_posts: editor.tree().total_post_count(),
            state: &self.state,
        }
    }
}
