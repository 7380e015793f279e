#[path = "update.rs"]
mod update;
#[path = "view.rs"]
pub(crate) mod view;

use homepage_api::ApiClient;
use iced::{Element, Task, Theme};

use crate::config::{self, AdminConfig};
use crate::widgets::category_editor::{
    CategoryEditorEffect, CategoryEditorEvent, CategoryEditorWidget,
};

pub(crate) const WINDOW_WIDTH: f32 = 760.0;
pub(crate) const WINDOW_HEIGHT: f32 = 640.0;

/// App-wide events that drive the root update loop.
#[derive(Debug, Clone)]
pub(crate) enum AppEvent {
    // Category editor widget
    CategoryEditorUi(CategoryEditorEvent),
    CategoryEditorEffect(CategoryEditorEffect),
}

/// Container for all widget instances.
pub(crate) struct Widgets {
    pub(crate) category_editor: CategoryEditorWidget,
}

/// Root application state.
pub(crate) struct App {
    pub(crate) config: AdminConfig,
    pub(crate) client: Option<ApiClient>,
    pub(crate) widgets: Widgets,
}

impl App {
    /// Initialize the application and return the first task.
    pub(crate) fn new() -> (Self, Task<AppEvent>) {
        let config = config::load_initial_config();
        let client =
            match ApiClient::new(config.base_url(), config.request_timeout()) {
                Ok(client) => Some(client),
                Err(err) => {
                    log::error!("failed to build HTTP client: {err}");
                    None
                },
            };

        let app = App {
            config,
            client,
            widgets: Widgets {
                category_editor: CategoryEditorWidget::new(),
            },
        };

        let boot = Task::done(AppEvent::CategoryEditorUi(
            CategoryEditorEvent::Reload,
        ));
        (app, boot)
    }

    /// Return the window title.
    pub(crate) fn title(&self) -> String {
        format!("Homepage Admin ({})", self.config.base_url())
    }

    /// Return the current iced theme.
    pub(crate) fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Handle an incoming event.
    pub(crate) fn update(&mut self, event: AppEvent) -> Task<AppEvent> {
        update::update(self, event)
    }

    /// Render the root view.
    pub(crate) fn view(&self) -> Element<'_, AppEvent, Theme, iced::Renderer> {
        view::view(self)
    }
}
