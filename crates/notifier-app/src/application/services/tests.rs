use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use notifier_domain::notification::{
    CreatedNotification, GatewayError, NotificationDraft, NotificationGateway, NotificationId,
    NotificationRecord, NotificationStatus,
};

use super::*;
use crate::application::dtos::{SearchPanel, SearchResult};
use crate::application::feedback::UserFeedback;
use crate::application::form::{
    toggle_channel_fields, FieldGroup, FieldId, FieldValue, NotificationForm,
};

// Mock gateway and feedback for testing

struct MockGateway {
    records: RwLock<HashMap<String, NotificationRecord>>,
    create_result: RwLock<Option<Result<CreatedNotification, GatewayError>>>,
    find_error: RwLock<Option<GatewayError>>,
    cancel_error: RwLock<Option<GatewayError>>,
    created: RwLock<Vec<NotificationDraft>>,
    lookups: RwLock<Vec<String>>,
    cancellations: RwLock<Vec<String>>,
}

impl MockGateway {
    fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            create_result: RwLock::new(None),
            find_error: RwLock::new(None),
            cancel_error: RwLock::new(None),
            created: RwLock::new(Vec::new()),
            lookups: RwLock::new(Vec::new()),
            cancellations: RwLock::new(Vec::new()),
        }
    }

    async fn insert(&self, id: &str, status: &str) {
        self.records.write().await.insert(
            id.to_string(),
            NotificationRecord {
                id: NotificationId::from_string(id),
                status: NotificationStatus::from(status),
                payload: None,
                channel: None,
                notification_date: None,
                recipient_id: None,
            },
        );
    }

    async fn fail_create(&self, err: GatewayError) {
        *self.create_result.write().await = Some(Err(err));
    }

    async fn fail_find(&self, err: GatewayError) {
        *self.find_error.write().await = Some(err);
    }

    async fn fail_cancel(&self, err: GatewayError) {
        *self.cancel_error.write().await = Some(err);
    }

    async fn created(&self) -> Vec<NotificationDraft> {
        self.created.read().await.clone()
    }

    async fn lookups(&self) -> Vec<String> {
        self.lookups.read().await.clone()
    }

    async fn cancellations(&self) -> Vec<String> {
        self.cancellations.read().await.clone()
    }
}

#[async_trait]
impl NotificationGateway for MockGateway {
    async fn create(
        &self,
        draft: &NotificationDraft,
    ) -> Result<CreatedNotification, GatewayError> {
        self.created.write().await.push(draft.clone());
        match self.create_result.read().await.clone() {
            Some(result) => result,
            None => Ok(CreatedNotification {
                id: NotificationId::from_string("n-1"),
                status: Some(NotificationStatus::Pending),
            }),
        }
    }

    async fn find(&self, id: &NotificationId) -> Result<NotificationRecord, GatewayError> {
        self.lookups.write().await.push(id.as_str().to_string());
        if let Some(err) = self.find_error.read().await.clone() {
            return Err(err);
        }
        self.records
            .read()
            .await
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| GatewayError::rejected(404, "Notification not found"))
    }

    async fn cancel(&self, id: &NotificationId) -> Result<(), GatewayError> {
        self.cancellations.write().await.push(id.as_str().to_string());
        if let Some(err) = self.cancel_error.read().await.clone() {
            return Err(err);
        }
        let mut records = self.records.write().await;
        match records.get_mut(id.as_str()) {
            Some(record) => {
                record.status = NotificationStatus::Cancelled;
                Ok(())
            }
            None => Err(GatewayError::rejected(404, "Notification not found")),
        }
    }
}

struct MockFeedback {
    answers: RwLock<VecDeque<bool>>,
    alerts: RwLock<Vec<String>>,
    confirmations: RwLock<Vec<String>>,
}

impl MockFeedback {
    fn new() -> Self {
        Self {
            answers: RwLock::new(VecDeque::new()),
            alerts: RwLock::new(Vec::new()),
            confirmations: RwLock::new(Vec::new()),
        }
    }

    fn answering(answer: bool) -> Self {
        Self {
            answers: RwLock::new(VecDeque::from([answer])),
            ..Self::new()
        }
    }

    async fn alerts(&self) -> Vec<String> {
        self.alerts.read().await.clone()
    }

    async fn confirmations(&self) -> Vec<String> {
        self.confirmations.read().await.clone()
    }
}

#[async_trait]
impl UserFeedback for MockFeedback {
    async fn alert(&self, message: &str) {
        self.alerts.write().await.push(message.to_string());
    }

    async fn confirm(&self, message: &str) -> bool {
        self.confirmations.write().await.push(message.to_string());
        self.answers.write().await.pop_front().unwrap_or(false)
    }
}

fn submitter(gateway: Arc<MockGateway>) -> NotificationSubmitter<Utc> {
    NotificationSubmitter::with_timezone(gateway, Utc)
}

fn telegram_form() -> NotificationForm {
    let mut form = NotificationForm::new();
    toggle_channel_fields(&mut form);
    form.set_value(FieldId::Payload, "hello");
    form.set_value(FieldId::NotificationDate, "2025-01-01T10:00");
    form.set_value(FieldId::TelegramRecipient, "12345");
    form
}

fn email_form() -> NotificationForm {
    let mut form = NotificationForm::new();
    form.select_channel("email");
    toggle_channel_fields(&mut form);
    form.set_value(FieldId::Payload, "report");
    form.set_value(FieldId::NotificationDate, "2025-01-01T10:00");
    form.set_value(FieldId::EmailRecipient, "a@b.co");
    form.set_value(FieldId::EmailFromEmail, "c@d.co");
    form.set_value(FieldId::EmailSmtpPort, "587");
    form.set_value(FieldId::EmailUsername, "user");
    form.set_value(FieldId::EmailPassword, "secret");
    form
}

// Submitter

#[tokio::test]
async fn test_submit_telegram_success_resets_form() {
    let gateway = Arc::new(MockGateway::new());
    let feedback = MockFeedback::new();
    let mut form = telegram_form();

    let outcome = submitter(gateway.clone()).submit(&mut form, &feedback).await;

    assert_eq!(outcome, SubmitOutcome::Created { id: "n-1".to_string() });
    assert_eq!(feedback.alerts().await, vec!["Notification created! ID: n-1"]);

    let created = gateway.created().await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].recipient_id(), "12345");
    assert!(created[0].email_config().is_none());
    assert_eq!(
        created[0].notification_date(),
        Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
    );

    assert_eq!(form.value(FieldId::Payload), "");
    assert_eq!(form.value(FieldId::TelegramRecipient), "");
    assert!(form.is_group_visible(FieldGroup::Telegram));
    assert!(form.is_required(FieldId::TelegramRecipient));
}

#[tokio::test]
async fn test_submit_after_email_resets_to_telegram_layout() {
    let gateway = Arc::new(MockGateway::new());
    let feedback = MockFeedback::new();
    let mut form = email_form();

    let outcome = submitter(gateway.clone()).submit(&mut form, &feedback).await;
    assert!(outcome.is_created());

    let created = gateway.created().await;
    let config = created[0].email_config().unwrap();
    assert_eq!(config.smtp_port, 587);
    assert_eq!(config.from_email, "c@d.co");

    assert_eq!(form.channel_selection(), "telegram");
    assert!(form.is_group_visible(FieldGroup::Telegram));
    assert!(!form.is_required(FieldId::EmailRecipient));
}

#[tokio::test]
async fn test_submit_uses_values_sent_with_the_request() {
    let gateway = Arc::new(MockGateway::new());
    let feedback = MockFeedback::new();
    let mut form = telegram_form();

    // The page edited the recipient but never synced it before submitting
    form.apply_values(&[
        FieldValue::new(FieldId::Payload, "hello"),
        FieldValue::new(FieldId::NotificationDate, "2025-01-01T10:00"),
        FieldValue::new(FieldId::Channel, "telegram"),
        FieldValue::new(FieldId::TelegramRecipient, "67890"),
    ]);
    let snapshot = form.clone();
    let submitter = submitter(gateway.clone());
    let outcome = submitter.process(&snapshot, &feedback).await;
    submitter.apply(&outcome, &mut form);

    assert!(outcome.is_created());
    let created = gateway.created().await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].recipient_id(), "67890");
    assert_eq!(form.value(FieldId::TelegramRecipient), "");
}

#[tokio::test]
async fn test_submit_with_sent_channel_switch_validates_email() {
    let gateway = Arc::new(MockGateway::new());
    let feedback = MockFeedback::new();
    let mut form = telegram_form();

    form.apply_values(&[
        FieldValue::new(FieldId::Channel, "email"),
        FieldValue::new(FieldId::EmailRecipient, "a@b.co"),
    ]);
    let outcome = submitter(gateway.clone()).submit(&mut form, &feedback).await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Invalid { ref error } if error.field == FieldId::EmailFromEmail
    ));
    assert!(gateway.created().await.is_empty());
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let gateway = Arc::new(MockGateway::new());
    let feedback = MockFeedback::new();
    let mut form = email_form();
    form.set_value(FieldId::EmailFromEmail, " ");

    let outcome = submitter(gateway.clone()).submit(&mut form, &feedback).await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Invalid { ref error } if error.field == FieldId::EmailFromEmail
    ));
    assert!(gateway.created().await.is_empty());
    assert_eq!(form.focused(), Some(FieldId::EmailFromEmail));
    assert_eq!(
        feedback.alerts().await,
        vec!["Please fill in the Sender email field"]
    );
    assert_eq!(form.value(FieldId::Payload), "report");
}

#[tokio::test]
async fn test_missing_payload_blocks_submission() {
    let gateway = Arc::new(MockGateway::new());
    let feedback = MockFeedback::new();
    let mut form = telegram_form();
    form.set_value(FieldId::Payload, "");

    let outcome = submitter(gateway.clone()).submit(&mut form, &feedback).await;

    assert!(matches!(outcome, SubmitOutcome::Invalid { .. }));
    assert!(gateway.created().await.is_empty());
    assert_eq!(form.focused(), Some(FieldId::Payload));
}

#[tokio::test]
async fn test_rejected_create_keeps_form() {
    let gateway = Arc::new(MockGateway::new());
    gateway
        .fail_create(GatewayError::rejected(400, "invalid date"))
        .await;
    let feedback = MockFeedback::new();
    let mut form = telegram_form();
    let before = form.clone();

    let outcome = submitter(gateway.clone()).submit(&mut form, &feedback).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            message: "invalid date".to_string()
        }
    );
    assert_eq!(
        feedback.alerts().await,
        vec!["Error creating notification: invalid date"]
    );
    assert_eq!(form, before);
}

#[tokio::test]
async fn test_network_failure_keeps_form() {
    let gateway = Arc::new(MockGateway::new());
    gateway
        .fail_create(GatewayError::transport("connection refused"))
        .await;
    let feedback = MockFeedback::new();
    let mut form = telegram_form();
    let before = form.clone();

    let outcome = submitter(gateway.clone()).submit(&mut form, &feedback).await;

    assert!(matches!(outcome, SubmitOutcome::NetworkFailure { .. }));
    assert_eq!(
        feedback.alerts().await,
        vec!["Network error: connection refused"]
    );
    assert_eq!(form, before);
    assert_eq!(gateway.created().await.len(), 1);
}

// Lookup / cancel

#[tokio::test]
async fn test_find_with_blank_id_warns_without_request() {
    let gateway = Arc::new(MockGateway::new());
    let controller = NotificationLookupController::new(gateway.clone());
    let feedback = MockFeedback::new();

    assert_eq!(controller.find("   ", &feedback).await, None);
    assert!(gateway.lookups().await.is_empty());
    assert_eq!(feedback.alerts().await, vec!["Please enter a notification ID"]);
}

#[tokio::test]
async fn test_find_trims_id_and_derives_cancel_state() {
    let gateway = Arc::new(MockGateway::new());
    gateway.insert("n-1", "pending").await;
    gateway.insert("n-2", "sent").await;
    let controller = NotificationLookupController::new(gateway.clone());
    let feedback = MockFeedback::new();

    let pending = controller.find(" n-1 ", &feedback).await.unwrap();
    let view = pending.notification().unwrap();
    assert_eq!(view.status_label, "PENDING");
    assert!(view.cancel_enabled);

    let sent = controller.find("n-2", &feedback).await.unwrap();
    assert!(!sent.notification().unwrap().cancel_enabled);

    assert_eq!(gateway.lookups().await, vec!["n-1", "n-2"]);
    assert!(feedback.alerts().await.is_empty());
}

#[tokio::test]
async fn test_find_renders_errors() {
    let gateway = Arc::new(MockGateway::new());
    let controller = NotificationLookupController::new(gateway.clone());
    let feedback = MockFeedback::new();

    let missing = controller.find("nope", &feedback).await;
    assert_eq!(
        missing,
        Some(SearchResult::Error("Notification not found".to_string()))
    );

    gateway.fail_find(GatewayError::transport("timed out")).await;
    let failed = controller.find("nope", &feedback).await;
    assert_eq!(
        failed,
        Some(SearchResult::Error("Error fetching notification".to_string()))
    );
}

#[tokio::test]
async fn test_new_lookup_overwrites_result() {
    let gateway = Arc::new(MockGateway::new());
    gateway.insert("n-1", "pending").await;
    let controller = NotificationLookupController::new(gateway.clone());
    let feedback = MockFeedback::new();
    let mut panel = SearchPanel {
        search_id: "n-1".to_string(),
        result: None,
    };

    controller.find_into(&mut panel, &feedback).await;
    assert!(panel.result.as_ref().unwrap().notification().is_some());

    panel.search_id = "missing".to_string();
    controller.find_into(&mut panel, &feedback).await;
    assert_eq!(
        panel.result,
        Some(SearchResult::Error("Notification not found".to_string()))
    );

    // An empty lookup leaves the previous result in place
    panel.search_id.clear();
    controller.find_into(&mut panel, &feedback).await;
    assert!(matches!(panel.result, Some(SearchResult::Error(_))));
}

#[tokio::test]
async fn test_cancel_declined_issues_no_request() {
    let gateway = Arc::new(MockGateway::new());
    gateway.insert("n-1", "pending").await;
    let controller = NotificationLookupController::new(gateway.clone());
    let feedback = MockFeedback::answering(false);

    let outcome = controller.cancel("n-1", &feedback).await;

    assert_eq!(outcome, CancelOutcome::Declined);
    assert!(gateway.cancellations().await.is_empty());
    assert_eq!(
        feedback.confirmations().await,
        vec!["Are you sure you want to cancel this notification?"]
    );
}

#[tokio::test]
async fn test_cancel_displayed_refreshes_status() {
    let gateway = Arc::new(MockGateway::new());
    gateway.insert("n-1", "pending").await;
    let controller = NotificationLookupController::new(gateway.clone());
    let feedback = MockFeedback::answering(true);
    let mut panel = SearchPanel {
        search_id: "n-1".to_string(),
        result: None,
    };
    controller.find_into(&mut panel, &feedback).await;

    // The user edits the search box before cancelling
    panel.search_id = "something-else".to_string();
    let outcome = controller.cancel_displayed(&mut panel, &feedback).await;

    assert!(matches!(outcome, CancelOutcome::Cancelled { refreshed: Some(_) }));
    assert_eq!(gateway.cancellations().await, vec!["n-1"]);
    assert_eq!(gateway.lookups().await, vec!["n-1", "n-1"]);
    assert_eq!(
        feedback.alerts().await,
        vec!["Notification cancelled successfully!"]
    );

    let view = panel.result.as_ref().unwrap().notification().unwrap();
    assert_eq!(view.status, "cancelled");
    assert!(!view.cancel_enabled);
}

#[tokio::test]
async fn test_cancel_displayed_requires_enabled_action() {
    let gateway = Arc::new(MockGateway::new());
    gateway.insert("n-1", "sent").await;
    let controller = NotificationLookupController::new(gateway.clone());
    let feedback = MockFeedback::answering(true);

    let mut panel = SearchPanel::default();
    assert_eq!(
        controller.cancel_displayed(&mut panel, &feedback).await,
        CancelOutcome::Unavailable
    );

    panel.search_id = "n-1".to_string();
    controller.find_into(&mut panel, &feedback).await;
    assert_eq!(
        controller.cancel_displayed(&mut panel, &feedback).await,
        CancelOutcome::Unavailable
    );

    assert!(feedback.confirmations().await.is_empty());
    assert!(gateway.cancellations().await.is_empty());
}

#[tokio::test]
async fn test_cancel_errors_are_reported() {
    let gateway = Arc::new(MockGateway::new());
    gateway.insert("n-1", "pending").await;
    gateway
        .fail_cancel(GatewayError::rejected(409, "already sent"))
        .await;
    let controller = NotificationLookupController::new(gateway.clone());

    let feedback = MockFeedback::answering(true);
    let outcome = controller.cancel("n-1", &feedback).await;
    assert_eq!(
        outcome,
        CancelOutcome::Rejected {
            message: "already sent".to_string()
        }
    );
    assert_eq!(
        feedback.alerts().await,
        vec!["Error cancelling notification: already sent"]
    );

    gateway.fail_cancel(GatewayError::transport("reset")).await;
    let feedback = MockFeedback::answering(true);
    let outcome = controller.cancel("n-1", &feedback).await;
    assert_eq!(outcome, CancelOutcome::NetworkFailure);
    assert_eq!(feedback.alerts().await, vec!["Error cancelling notification"]);

    // No refresh after a failed cancellation
    assert!(gateway.lookups().await.is_empty());
    assert_eq!(gateway.cancellations().await.len(), 2);
}
