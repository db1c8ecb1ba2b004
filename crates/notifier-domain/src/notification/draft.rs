use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use super::value_objects::{Channel, EmailConfig};

/// Channel-specific part of a draft.
///
/// Telegram carries only a chat identifier; e-mail carries an address plus the
/// SMTP settings. The two shapes never coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Telegram {
        recipient_id: String,
    },
    Email {
        recipient_id: String,
        config: EmailConfig,
    },
}

impl Delivery {
    pub fn channel(&self) -> Channel {
        match self {
            Delivery::Telegram { .. } => Channel::Telegram,
            Delivery::Email { .. } => Channel::Email,
        }
    }

    pub fn recipient_id(&self) -> &str {
        match self {
            Delivery::Telegram { recipient_id } | Delivery::Email { recipient_id, .. } => {
                recipient_id
            }
        }
    }

    pub fn email_config(&self) -> Option<&EmailConfig> {
        match self {
            Delivery::Telegram { .. } => None,
            Delivery::Email { config, .. } => Some(config),
        }
    }
}

/// A notification composed by the operator and not yet accepted by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    payload: String,
    notification_date: DateTime<Utc>,
    delivery: Delivery,
}

impl NotificationDraft {
    pub fn new(
        payload: impl Into<String>,
        notification_date: DateTime<Utc>,
        delivery: Delivery,
    ) -> Self {
        Self {
            payload: payload.into(),
            notification_date,
            delivery,
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn notification_date(&self) -> DateTime<Utc> {
        self.notification_date
    }

    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    pub fn channel(&self) -> Channel {
        self.delivery.channel()
    }

    pub fn recipient_id(&self) -> &str {
        self.delivery.recipient_id()
    }

    pub fn email_config(&self) -> Option<&EmailConfig> {
        self.delivery.email_config()
    }
}

/// Wire shape of `POST /notify`
#[derive(Serialize)]
struct CreateNotificationBody<'a> {
    payload: &'a str,
    notification_date: String,
    recipient_id: &'a str,
    channel: Channel,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_config: Option<&'a EmailConfig>,
}

impl Serialize for NotificationDraft {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CreateNotificationBody {
            payload: &self.payload,
            notification_date: self
                .notification_date
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            recipient_id: self.delivery.recipient_id(),
            channel: self.delivery.channel(),
            email_config: self.delivery.email_config(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_config() -> EmailConfig {
        EmailConfig {
            subject: "Standup".to_string(),
            from_name: "Scheduler".to_string(),
            from_email: "scheduler@example.com".to_string(),
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            username: "scheduler".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_telegram_body_has_no_email_config() {
        let date = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let draft = NotificationDraft::new(
            "hello",
            date,
            Delivery::Telegram {
                recipient_id: "12345".to_string(),
            },
        );

        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["channel"], "telegram");
        assert_eq!(body["recipient_id"], "12345");
        assert_eq!(body["payload"], "hello");
        assert_eq!(body["notification_date"], "2025-01-01T10:00:00.000Z");
        assert!(body.get("email_config").is_none());
    }

    #[test]
    fn test_email_body_carries_config() {
        let date = Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 0).unwrap();
        let draft = NotificationDraft::new(
            "report",
            date,
            Delivery::Email {
                recipient_id: "team@example.com".to_string(),
                config: sample_config(),
            },
        );

        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["channel"], "email");
        let config = body["email_config"].as_object().unwrap();
        assert_eq!(config.len(), 7);
        assert!(config["smtp_port"].is_u64());
        assert_eq!(config["smtp_port"], 587);
    }

    #[test]
    fn test_delivery_accessors() {
        let delivery = Delivery::Email {
            recipient_id: "a@b.co".to_string(),
            config: sample_config(),
        };
        assert_eq!(delivery.channel(), Channel::Email);
        assert_eq!(delivery.recipient_id(), "a@b.co");
        assert!(delivery.email_config().is_some());

        let delivery = Delivery::Telegram {
            recipient_id: "42".to_string(),
        };
        assert_eq!(delivery.channel(), Channel::Telegram);
        assert!(delivery.email_config().is_none());
    }
}
