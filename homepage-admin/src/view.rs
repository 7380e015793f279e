use iced::{Element, Theme};

use super::{App, AppEvent};
use crate::widgets::category_editor::view::category_list;

/// Render the root application view.
pub(super) fn view(app: &App) -> Element<'_, AppEvent, Theme, iced::Renderer> {
    category_list::view(category_list::CategoryListProps {
        vm: app.widgets.category_editor.vm(),
    })
    .map(AppEvent::CategoryEditorUi)
}
