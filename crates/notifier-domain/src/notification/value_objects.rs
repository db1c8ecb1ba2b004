use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

/// Notification identifier assigned by the backend.
///
/// Opaque to the client: it is never generated or parsed locally, only echoed
/// back in lookup and cancel requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn from_string(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Delivery channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Telegram,
    Email,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Telegram => "telegram",
            Channel::Email => "email",
        }
    }
}

impl FromStr for Channel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "telegram" => Ok(Channel::Telegram),
            "email" => Ok(Channel::Email),
            _ => Err(DomainError::InvalidInput(format!("Unknown channel: {s}"))),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Notification status as reported by the backend.
///
/// The backend owns the vocabulary. Values the client does not know about are
/// kept verbatim in `Other` so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
    Cancelled,
    Other(String),
}

impl NotificationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            NotificationStatus::Pending => "pending",
            NotificationStatus::Sent => "sent",
            NotificationStatus::Failed => "failed",
            NotificationStatus::Cancelled => "cancelled",
            NotificationStatus::Other(raw) => raw,
        }
    }

    /// `sent` and `cancelled` admit no further transition, cancellation included.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            NotificationStatus::Sent | NotificationStatus::Cancelled
        )
    }

    pub fn is_cancellable(&self) -> bool {
        !self.is_terminal()
    }

    /// Upper-cased label shown in the lookup result
    pub fn display_label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl From<String> for NotificationStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => NotificationStatus::Pending,
            "sent" => NotificationStatus::Sent,
            "failed" => NotificationStatus::Failed,
            "cancelled" => NotificationStatus::Cancelled,
            _ => NotificationStatus::Other(raw),
        }
    }
}

impl From<&str> for NotificationStatus {
    fn from(raw: &str) -> Self {
        NotificationStatus::from(raw.to_string())
    }
}

impl From<NotificationStatus> for String {
    fn from(status: NotificationStatus) -> Self {
        match status {
            NotificationStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// SMTP delivery settings attached to e-mail notifications
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfig {
    pub subject: String,
    pub from_name: String,
    pub from_email: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("subject", &self.subject)
            .field("from_name", &self.from_name)
            .field("from_email", &self.from_email)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

// Local part, '@', and a domain with at least one inner dot. Not RFC 5322.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("e-mail pattern is a valid regex")
});

/// Permissive e-mail address check
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_PATTERN.is_match(address)
}
