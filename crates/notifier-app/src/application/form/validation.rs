use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use notifier_domain::notification::{is_valid_email, Channel};

use super::{FieldId, FormField, NotificationForm};

/// Inputs the e-mail channel cannot do without, in the order they are checked
pub const EMAIL_REQUIRED_FIELDS: [FieldId; 4] = [
    FieldId::EmailRecipient,
    FieldId::EmailFromEmail,
    FieldId::EmailUsername,
    FieldId::EmailPassword,
];

/// Client-side rejection of the form, pointing at the input to fix
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[cfg_attr(feature = "desktop", derive(specta::Type))]
#[error("{message}")]
pub struct FieldError {
    pub field: FieldId,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FieldId, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Reject the first input flagged required that is still empty, in form
/// order, the way a host's native form validation would. Whitespace counts as
/// a value here; only the e-mail rules trim.
pub fn check_required_fields(form: &NotificationForm) -> Result<(), FieldError> {
    match form
        .fields()
        .iter()
        .find(|field| field.required && field.value.is_empty())
    {
        Some(field) => Err(blank_field(field)),
        None => Ok(()),
    }
}

fn blank_field(field: &FormField) -> FieldError {
    debug!(field = field.id.as_str(), "Required field is blank");
    FieldError::new(
        field.id,
        format!("Please fill in the {} field", field.label()),
    )
}

/// Check the e-mail group before submission.
///
/// Blank required inputs are reported first, in `EMAIL_REQUIRED_FIELDS`
/// order; only then are the recipient and sender addresses checked, recipient
/// first. The first problem found is returned. Any channel other than e-mail
/// passes.
pub fn validate_email_fields(form: &NotificationForm) -> Result<(), FieldError> {
    if form.channel() != Some(Channel::Email) {
        return Ok(());
    }

    if let Some(field) = EMAIL_REQUIRED_FIELDS
        .iter()
        .map(|id| form.field(*id))
        .find(|field| field.is_blank())
    {
        return Err(blank_field(field));
    }

    if !is_valid_email(form.value(FieldId::EmailRecipient)) {
        return Err(FieldError::new(
            FieldId::EmailRecipient,
            "Please enter a valid recipient email address",
        ));
    }

    if !is_valid_email(form.value(FieldId::EmailFromEmail)) {
        return Err(FieldError::new(
            FieldId::EmailFromEmail,
            "Please enter a valid sender email address",
        ));
    }

    Ok(())
}
