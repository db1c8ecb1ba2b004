use async_trait::async_trait;
use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tokio::sync::oneshot;
use tracing::warn;

use crate::application::UserFeedback;

const DIALOG_TITLE: &str = "Delayed Notifier";

/// `UserFeedback` backed by native message dialogs
pub struct DialogFeedback {
    app: AppHandle,
}

impl DialogFeedback {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

#[async_trait]
impl UserFeedback for DialogFeedback {
    async fn alert(&self, message: &str) {
        let (tx, rx) = oneshot::channel();
        self.app
            .dialog()
            .message(message)
            .title(DIALOG_TITLE)
            .kind(MessageDialogKind::Info)
            .show(move |_| {
                let _ = tx.send(());
            });

        if rx.await.is_err() {
            warn!("Message dialog closed without a response");
        }
    }

    async fn confirm(&self, message: &str) -> bool {
        let (tx, rx) = oneshot::channel();
        self.app
            .dialog()
            .message(message)
            .title(DIALOG_TITLE)
            .kind(MessageDialogKind::Warning)
            .buttons(MessageDialogButtons::OkCancel)
            .show(move |confirmed| {
                let _ = tx.send(confirmed);
            });

        // A dialog that never answers counts as a refusal
        rx.await.unwrap_or(false)
    }
}
