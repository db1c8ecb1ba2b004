use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use notifier_domain::notification::NotificationGateway;
use notifier_infrastructure::config::ApiConfig;
use notifier_infrastructure::http::HttpNotificationGateway;

use crate::application::dtos::SearchPanel;
use crate::application::form::{toggle_channel_fields, NotificationForm};
use crate::application::services::{NotificationLookupController, NotificationSubmitter};
use crate::presentation::dialog::DialogFeedback;
use crate::presentation::state::AppState;

pub fn build_app_state(app_handle: tauri::AppHandle) -> anyhow::Result<AppState> {
    let config = ApiConfig::from_build()?;
    info!(api_base = %config.base_url(), "Using notification backend");

    let gateway: Arc<dyn NotificationGateway> = Arc::new(HttpNotificationGateway::new(config)?);

    // Default channel group shown before any interaction
    let mut form = NotificationForm::new();
    toggle_channel_fields(&mut form);

    Ok(AppState {
        submitter: NotificationSubmitter::new(gateway.clone()),
        lookup: NotificationLookupController::new(gateway),
        feedback: DialogFeedback::new(app_handle),
        form: Mutex::new(form),
        search: Mutex::new(SearchPanel::default()),
    })
}
