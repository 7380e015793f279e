use homepage_api::ApiClient;
use homepage_categories::{CategorySnapshot, SaveRequest};
use iced::Task;
use secrecy::{ExposeSecret, SecretString};

use crate::app::{App, AppEvent};
use crate::widgets::category_editor::{
    CategoryEditorCommand, CategoryEditorEffect, CategoryEditorEvent,
    FetchPurpose,
};

const CLIENT_UNAVAILABLE: &str = "HTTP client is not available";

/// Route a category editor UI event through the widget reducer.
pub(crate) fn route_event(
    app: &mut App,
    event: CategoryEditorEvent,
) -> Task<AppEvent> {
    let command = map_event_to_command(event);
    app.widgets
        .category_editor
        .reduce(command)
        .map(AppEvent::CategoryEditorEffect)
}

/// Route a category editor effect to API tasks.
pub(crate) fn route_effect(
    app: &App,
    effect: CategoryEditorEffect,
) -> Task<AppEvent> {
    match effect {
        CategoryEditorEffect::Save(request) => request_save(app, request),
        CategoryEditorEffect::Fetch(purpose) => request_fetch(app, purpose),
    }
}

fn request_save(app: &App, request: SaveRequest) -> Task<AppEvent> {
    let client = app.client.clone();
    let target = request.target();

    Task::perform(
        async move {
            match client {
                Some(client) => send_save(&client, request).await,
                None => Err(String::from(CLIENT_UNAVAILABLE)),
            }
        },
        move |result| {
            AppEvent::CategoryEditorUi(CategoryEditorEvent::SaveCompleted {
                target,
                result,
            })
        },
    )
}

async fn send_save(
    client: &ApiClient,
    request: SaveRequest,
) -> Result<(), String> {
    match request {
        SaveRequest::Create {
            local_id,
            name,
            parent_id,
        } => {
            let record = client
                .create_category(&name, parent_id)
                .await
                .map_err(|err| format!("{err}"))?;
            log::debug!("created category {local_id} as {:?}", record.name);
        },
        SaveRequest::Update {
            id,
            name,
            parent_id,
        } => {
            client
                .update_category(id, &name, parent_id)
                .await
                .map_err(|err| format!("{err}"))?;
            log::debug!("updated category {id}");
        },
        SaveRequest::Delete { id } => {
            let deleted = client
                .delete_category(id)
                .await
                .map_err(|err| format!("{err}"))?;
            if !deleted {
                return Err(format!("server did not delete category {id}"));
            }
            log::debug!("deleted category {id}");
        },
    }
    Ok(())
}

fn request_fetch(app: &App, purpose: FetchPurpose) -> Task<AppEvent> {
    let client = app.client.clone();
    let visible = app.config.visible_only();
    // Log in once, on the first hydration of the session.
    let credentials = match purpose {
        FetchPurpose::Initial => {
            app.config.credentials().map(|(username, password)| {
                (
                    username.to_string(),
                    SecretString::from(password.expose_secret().to_owned()),
                )
            })
        },
        FetchPurpose::Resync => None,
    };

    Task::perform(
        async move {
            match client {
                Some(client) => fetch(&client, credentials, visible).await,
                None => Err(String::from(CLIENT_UNAVAILABLE)),
            }
        },
        move |result| {
            AppEvent::CategoryEditorUi(CategoryEditorEvent::Loaded {
                purpose,
                result,
            })
        },
    )
}

async fn fetch(
    client: &ApiClient,
    credentials: Option<(String, SecretString)>,
    visible: Option<bool>,
) -> Result<Vec<CategorySnapshot>, String> {
    if let Some((username, password)) = credentials {
        client
            .login(&username, &password)
            .await
            .map_err(|err| format!("login failed: {err}"))?;
    }
    client
        .categories(visible)
        .await
        .map_err(|err| format!("{err}"))
}

fn map_event_to_command(event: CategoryEditorEvent) -> CategoryEditorCommand {
    use {CategoryEditorCommand as C, CategoryEditorEvent as E};

    match event {
        E::AddRoot => C::AddRoot,
        E::AddChild { parent_id } => C::AddChild { parent_id },
        E::Edit { id } => C::Edit { id },
        E::DraftChanged { id, value } => C::DraftChanged { id, value },
        E::Commit { id } => C::Commit { id },
        E::Cancel { id } => C::Cancel { id },
        E::Delete { id } => C::Delete { id },
        E::Save => C::Save,
        E::Reload => C::Reload,
        E::Loaded { purpose, result } => match result {
            Ok(snapshots) => C::LoadCompleted { purpose, snapshots },
            Err(message) => C::LoadFailed { purpose, message },
        },
        E::SaveCompleted { target, result } => match result {
            Ok(()) => C::SaveSucceeded(target),
            Err(message) => C::SaveFailed { target, message },
        },
    }
}

#[cfg(test)]
mod tests {
    use homepage_categories::{CategoryId, SaveKind, SaveTarget};

    use super::*;

    #[test]
    fn given_failed_save_completion_when_mapped_then_save_failed_command() {
        let target = SaveTarget::new(CategoryId::new(3), SaveKind::Update);

        let command =
            map_event_to_command(CategoryEditorEvent::SaveCompleted {
                target,
                result: Err(String::from("boom")),
            });

        match command {
            CategoryEditorCommand::SaveFailed {
                target: mapped,
                message,
            } => {
                assert_eq!(mapped, target);
                assert_eq!(message, "boom");
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_successful_load_when_mapped_then_load_completed_command() {
        let command = map_event_to_command(CategoryEditorEvent::Loaded {
            purpose: FetchPurpose::Resync,
            result: Ok(Vec::new()),
        });

        assert!(matches!(
            command,
            CategoryEditorCommand::LoadCompleted {
                purpose: FetchPurpose::Resync,
                ..
            }
        ));
    }
}
