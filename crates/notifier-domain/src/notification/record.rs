use serde::{Deserialize, Serialize};

use super::value_objects::{NotificationId, NotificationStatus};

/// Acknowledgement returned by `POST /notify`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedNotification {
    pub id: NotificationId,
    #[serde(default)]
    pub status: Option<NotificationStatus>,
}

/// Server-side view of a notification returned by `GET /notify/{id}`.
///
/// Only `id` and `status` are guaranteed; the remaining details are rendered
/// verbatim when the backend includes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: NotificationId,
    pub status: NotificationStatus,
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub notification_date: Option<String>,
    #[serde(default)]
    pub recipient_id: Option<String>,
}

impl NotificationRecord {
    pub fn can_cancel(&self) -> bool {
        self.status.is_cancellable()
    }
}
