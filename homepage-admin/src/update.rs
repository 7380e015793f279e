use iced::Task;

use super::{App, AppEvent};
use crate::routers;

/// Thin dispatch: route each event to its owning router.
pub(super) fn update(app: &mut App, event: AppEvent) -> Task<AppEvent> {
    match event {
        AppEvent::CategoryEditorUi(event) => {
            routers::category_editor::route_event(app, event)
        },
        AppEvent::CategoryEditorEffect(effect) => {
            routers::category_editor::route_effect(app, effect)
        },
    }
}
