use tokio::sync::Mutex;

use crate::application::dtos::SearchPanel;
use crate::application::form::NotificationForm;
use crate::application::services::{NotificationLookupController, NotificationSubmitter};
use crate::presentation::dialog::DialogFeedback;

/// Everything the commands share.
///
/// The form and the search panel are locked only to read or write them,
/// never across a backend call or a dialog.
pub struct AppState {
    pub submitter: NotificationSubmitter,
    pub lookup: NotificationLookupController,
    pub feedback: DialogFeedback,
    pub form: Mutex<NotificationForm>,
    pub search: Mutex<SearchPanel>,
}

impl AppState {
    pub fn new(app_handle: tauri::AppHandle) -> anyhow::Result<Self> {
        crate::presentation::bootstrap::build_app_state(app_handle)
    }

    pub async fn form_snapshot(&self) -> NotificationForm {
        self.form.lock().await.clone()
    }

    pub async fn search_snapshot(&self) -> SearchPanel {
        self.search.lock().await.clone()
    }
}
