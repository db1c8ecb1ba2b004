use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use notifier_domain::notification::{GatewayError, NotificationDraft, NotificationGateway};

use crate::application::feedback::UserFeedback;
use crate::application::form::{
    build_draft, check_required_fields, toggle_channel_fields, validate_email_fields, FieldError,
    NotificationForm,
};

/// Result of one press of the submit button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "desktop", derive(specta::Type))]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SubmitOutcome {
    /// Stopped on the client, nothing was sent
    Invalid { error: FieldError },
    Created { id: String },
    /// The backend answered with an error body
    Rejected { message: String },
    /// No usable answer from the backend
    NetworkFailure { detail: String },
}

impl SubmitOutcome {
    /// Text shown to the user for this outcome
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Invalid { error } => error.message.clone(),
            SubmitOutcome::Created { id } => format!("Notification created! ID: {id}"),
            SubmitOutcome::Rejected { message } => {
                format!("Error creating notification: {message}")
            }
            SubmitOutcome::NetworkFailure { detail } => format!("Network error: {detail}"),
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, SubmitOutcome::Created { .. })
    }
}

impl From<GatewayError> for SubmitOutcome {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Rejected { message, .. } => SubmitOutcome::Rejected { message },
            GatewayError::Transport(detail) => SubmitOutcome::NetworkFailure { detail },
        }
    }
}

/// Validates the form, sends the create request and reports the outcome.
///
/// Date inputs are read as wall-clock time in `Tz`. A submission is made
/// exactly once; failures wait for the user to submit again.
pub struct NotificationSubmitter<Tz: TimeZone = Local> {
    gateway: Arc<dyn NotificationGateway>,
    tz: Tz,
}

impl NotificationSubmitter<Local> {
    pub fn new(gateway: Arc<dyn NotificationGateway>) -> Self {
        Self::with_timezone(gateway, Local)
    }
}

impl<Tz: TimeZone> NotificationSubmitter<Tz> {
    pub fn with_timezone(gateway: Arc<dyn NotificationGateway>, tz: Tz) -> Self {
        Self { gateway, tz }
    }

    /// Client-side checks and draft assembly; no request is made
    pub fn prepare(&self, form: &NotificationForm) -> Result<NotificationDraft, FieldError> {
        check_required_fields(form)?;
        validate_email_fields(form)?;
        build_draft(form, &self.tz)
    }

    /// Issue the create request for an already validated draft
    pub async fn send(&self, draft: &NotificationDraft) -> SubmitOutcome {
        match self.gateway.create(draft).await {
            Ok(created) => {
                info!(notification_id = %created.id, "Notification submitted");
                SubmitOutcome::Created {
                    id: created.id.as_str().to_string(),
                }
            }
            Err(err) => {
                warn!(
                    transport = err.is_transport(),
                    "Notification submission failed: {}", err
                );
                SubmitOutcome::from(err)
            }
        }
    }

    /// Bring the form in line with an outcome.
    ///
    /// A created notification resets the form and restores the default
    /// channel layout; a client-side failure focuses the offending input;
    /// anything else leaves the form as the user left it.
    pub fn apply(&self, outcome: &SubmitOutcome, form: &mut NotificationForm) {
        match outcome {
            SubmitOutcome::Created { .. } => {
                form.reset();
                toggle_channel_fields(form);
            }
            SubmitOutcome::Invalid { error } => form.focus(error.field),
            SubmitOutcome::Rejected { .. } | SubmitOutcome::NetworkFailure { .. } => {}
        }
    }

    /// Validate, send and report, without touching the form.
    ///
    /// Hosts that share the form between tasks run this without holding it,
    /// then hand the outcome to [`apply`](Self::apply).
    pub async fn process(
        &self,
        form: &NotificationForm,
        feedback: &dyn UserFeedback,
    ) -> SubmitOutcome {
        let outcome = match self.prepare(form) {
            Ok(draft) => self.send(&draft).await,
            Err(error) => SubmitOutcome::Invalid { error },
        };

        feedback.alert(&outcome.message()).await;
        outcome
    }

    /// Full submit flow on a form the caller owns for the duration
    pub async fn submit(
        &self,
        form: &mut NotificationForm,
        feedback: &dyn UserFeedback,
    ) -> SubmitOutcome {
        let outcome = self.process(form, feedback).await;
        self.apply(&outcome, form);
        outcome
    }
}
