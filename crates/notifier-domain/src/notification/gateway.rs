use async_trait::async_trait;

use super::draft::NotificationDraft;
use super::record::{CreatedNotification, NotificationRecord};
use super::value_objects::NotificationId;
use crate::shared::{ErrorCode, ErrorSeverity};

/// Failure of a call to the notification backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The backend answered with a non-2xx status and a structured error body
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// No usable answer: connection failure or an undecodable body
    #[error("{0}")]
    Transport(String),
}

impl GatewayError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        GatewayError::Transport(message.into())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            GatewayError::Rejected { .. } => ErrorCode::ExternalServiceError,
            GatewayError::Transport(_) => ErrorCode::NetworkError,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }
}

/// REST contract of the scheduling backend
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Schedule a new notification
    async fn create(&self, draft: &NotificationDraft)
        -> Result<CreatedNotification, GatewayError>;

    /// Fetch a notification by identifier
    async fn find(&self, id: &NotificationId) -> Result<NotificationRecord, GatewayError>;

    /// Cancel a notification by identifier
    async fn cancel(&self, id: &NotificationId) -> Result<(), GatewayError>;
}
