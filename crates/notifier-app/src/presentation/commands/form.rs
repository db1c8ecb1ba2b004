use serde::{Deserialize, Serialize};
use specta::Type;
use tauri::State;

use notifier_domain::notification::Channel;

use crate::application::form::{toggle_channel_fields, FieldId, FieldValue, NotificationForm};
use crate::application::services::SubmitOutcome;
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct SubmitResponse {
    pub outcome: SubmitOutcome,
    pub form: NotificationForm,
}

/// Current state of the create form
#[tauri::command]
#[specta::specta]
pub async fn get_form(state: State<'_, AppState>) -> Result<NotificationForm, CommandError> {
    Ok(state.form_snapshot().await)
}

/// Change the channel selector and re-layout the channel groups
#[tauri::command]
#[specta::specta]
pub async fn select_channel(
    channel: String,
    state: State<'_, AppState>,
) -> Result<NotificationForm, CommandError> {
    let channel: Channel = channel.parse()?;

    let mut form = state.form.lock().await;
    form.select_channel(channel.as_str());
    toggle_channel_fields(&mut form);
    Ok(form.clone())
}

/// Store the value typed into one input
#[tauri::command]
#[specta::specta]
pub async fn update_form_field(
    field: FieldId,
    value: String,
    state: State<'_, AppState>,
) -> Result<NotificationForm, CommandError> {
    if field == FieldId::Channel {
        return select_channel(value, state).await;
    }

    let mut form = state.form.lock().await;
    form.set_value(field, value);
    Ok(form.clone())
}

/// Submit the form to the backend.
///
/// `values` carries what the page shows at submit time; it is stored before the
/// snapshot is taken so an unsynced edit is never lost.
#[tauri::command]
#[specta::specta]
pub async fn submit_notification(
    values: Vec<FieldValue>,
    state: State<'_, AppState>,
) -> Result<SubmitResponse, CommandError> {
    let snapshot = {
        let mut form = state.form.lock().await;
        form.apply_values(&values);
        form.clone()
    };
    let outcome = state.submitter.process(&snapshot, &state.feedback).await;

    let mut form = state.form.lock().await;
    state.submitter.apply(&outcome, &mut form);

    Ok(SubmitResponse {
        outcome,
        form: form.clone(),
    })
}
