use serde::{Deserialize, Serialize};

use notifier_domain::notification::NotificationRecord;

/// Lookup result as shown in the search area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "desktop", derive(specta::Type))]
pub struct NotificationView {
    pub id: String,
    pub status: String,
    /// Status as displayed, upper-cased
    pub status_label: String,
    pub cancel_enabled: bool,
    pub payload: Option<String>,
    pub channel: Option<String>,
    pub notification_date: Option<String>,
    pub recipient_id: Option<String>,
}

impl From<NotificationRecord> for NotificationView {
    fn from(record: NotificationRecord) -> Self {
        Self {
            cancel_enabled: record.can_cancel(),
            status_label: record.status.display_label(),
            status: record.status.as_str().to_string(),
            id: record.id.as_str().to_string(),
            payload: record.payload,
            channel: record.channel,
            notification_date: record.notification_date,
            recipient_id: record.recipient_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "desktop", derive(specta::Type))]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum SearchResult {
    Found(NotificationView),
    /// Backend message, or the generic fetch error
    Error(String),
}

impl SearchResult {
    pub fn notification(&self) -> Option<&NotificationView> {
        match self {
            SearchResult::Found(view) => Some(view),
            SearchResult::Error(_) => None,
        }
    }
}

/// Identifier input plus the single result area it fills
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "desktop", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct SearchPanel {
    pub search_id: String,
    pub result: Option<SearchResult>,
}
