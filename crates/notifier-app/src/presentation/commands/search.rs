use serde::{Deserialize, Serialize};
use specta::Type;
use tauri::State;
use tracing::debug;

use crate::application::dtos::SearchPanel;
use crate::application::services::{CancelOutcome, NotificationLookupController};
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct CancelResponse {
    pub outcome: CancelOutcome,
    pub panel: SearchPanel,
}

/// Look a notification up by identifier; the result replaces the one shown
#[tauri::command]
#[specta::specta]
pub async fn find_notification(
    search_id: String,
    state: State<'_, AppState>,
) -> Result<SearchPanel, CommandError> {
    state.search.lock().await.search_id = search_id.clone();

    let result = state.lookup.find(&search_id, &state.feedback).await;

    let mut panel = state.search.lock().await;
    if let Some(result) = result {
        panel.result = Some(result);
    }
    Ok(panel.clone())
}

/// Cancel the notification currently displayed, after confirmation
#[tauri::command]
#[specta::specta]
pub async fn cancel_notification(
    state: State<'_, AppState>,
) -> Result<CancelResponse, CommandError> {
    let panel = state.search_snapshot().await;

    let outcome = match NotificationLookupController::cancellable_id(&panel) {
        Some(id) => state.lookup.cancel(&id, &state.feedback).await,
        None => {
            debug!("No cancellable notification displayed");
            CancelOutcome::Unavailable
        }
    };

    let mut panel = state.search.lock().await;
    if let CancelOutcome::Cancelled {
        refreshed: Some(result),
    } = &outcome
    {
        panel.result = Some(result.clone());
    }

    Ok(CancelResponse {
        outcome,
        panel: panel.clone(),
    })
}
