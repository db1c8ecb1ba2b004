use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use notifier_domain::notification::{GatewayError, NotificationGateway, NotificationId};

use crate::application::dtos::{NotificationView, SearchPanel, SearchResult};
use crate::application::feedback::UserFeedback;

const EMPTY_ID_MESSAGE: &str = "Please enter a notification ID";
const FETCH_FAILED_MESSAGE: &str = "Error fetching notification";
const CANCEL_CONFIRMATION: &str = "Are you sure you want to cancel this notification?";
const CANCELLED_MESSAGE: &str = "Notification cancelled successfully!";
const CANCEL_FAILED_MESSAGE: &str = "Error cancelling notification";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "desktop", derive(specta::Type))]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CancelOutcome {
    /// The user did not confirm; no request was made
    Declined,
    /// Nothing cancellable is displayed
    Unavailable,
    Cancelled { refreshed: Option<SearchResult> },
    Rejected { message: String },
    NetworkFailure,
}

/// Lookup by identifier and cancellation of the displayed notification
pub struct NotificationLookupController {
    gateway: Arc<dyn NotificationGateway>,
}

impl NotificationLookupController {
    pub fn new(gateway: Arc<dyn NotificationGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch a notification for display.
    ///
    /// Returns `None` without a request when the trimmed identifier is empty;
    /// the user has then been warned.
    pub async fn find(&self, raw_id: &str, feedback: &dyn UserFeedback) -> Option<SearchResult> {
        let id = raw_id.trim();
        if id.is_empty() {
            feedback.alert(EMPTY_ID_MESSAGE).await;
            return None;
        }

        let id = NotificationId::from_string(id);
        let result = match self.gateway.find(&id).await {
            Ok(record) => {
                debug!(notification_id = %id, status = %record.status, "Lookup succeeded");
                SearchResult::Found(NotificationView::from(record))
            }
            Err(GatewayError::Rejected { message, .. }) => {
                warn!(notification_id = %id, "Lookup rejected: {}", message);
                SearchResult::Error(message)
            }
            Err(GatewayError::Transport(detail)) => {
                warn!(notification_id = %id, "Lookup failed: {}", detail);
                SearchResult::Error(FETCH_FAILED_MESSAGE.to_string())
            }
        };

        Some(result)
    }

    /// Look up `panel.search_id` and replace the displayed result
    pub async fn find_into(&self, panel: &mut SearchPanel, feedback: &dyn UserFeedback) {
        if let Some(result) = self.find(&panel.search_id, feedback).await {
            panel.result = Some(result);
        }
    }

    /// Cancel after the user confirms, then refresh the lookup for `id`
    pub async fn cancel(&self, id: &str, feedback: &dyn UserFeedback) -> CancelOutcome {
        if !feedback.confirm(CANCEL_CONFIRMATION).await {
            debug!(notification_id = id, "Cancellation declined");
            return CancelOutcome::Declined;
        }

        let notification_id = NotificationId::from_string(id);
        match self.gateway.cancel(&notification_id).await {
            Ok(()) => {
                info!(notification_id = id, "Notification cancelled");
                feedback.alert(CANCELLED_MESSAGE).await;
                let refreshed = self.find(id, feedback).await;
                CancelOutcome::Cancelled { refreshed }
            }
            Err(GatewayError::Rejected { message, .. }) => {
                warn!(notification_id = id, "Cancellation rejected: {}", message);
                feedback
                    .alert(&format!("{CANCEL_FAILED_MESSAGE}: {message}"))
                    .await;
                CancelOutcome::Rejected { message }
            }
            Err(GatewayError::Transport(detail)) => {
                warn!(notification_id = id, "Cancellation failed: {}", detail);
                feedback.alert(CANCEL_FAILED_MESSAGE).await;
                CancelOutcome::NetworkFailure
            }
        }
    }

    /// Identifier behind the cancel action of the displayed result, if enabled
    pub fn cancellable_id(panel: &SearchPanel) -> Option<String> {
        panel
            .result
            .as_ref()
            .and_then(SearchResult::notification)
            .filter(|view| view.cancel_enabled)
            .map(|view| view.id.clone())
    }

    /// Cancel action of the search panel; the refreshed status replaces the
    /// displayed result
    pub async fn cancel_displayed(
        &self,
        panel: &mut SearchPanel,
        feedback: &dyn UserFeedback,
    ) -> CancelOutcome {
        let Some(id) = Self::cancellable_id(panel) else {
            return CancelOutcome::Unavailable;
        };

        let outcome = self.cancel(&id, feedback).await;
        if let CancelOutcome::Cancelled {
            refreshed: Some(result),
        } = &outcome
        {
            panel.result = Some(result.clone());
        }
        outcome
    }
}
