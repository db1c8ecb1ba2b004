use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

use notifier_domain::notification::{Channel, Delivery, EmailConfig, NotificationDraft};

use super::{resolve_recipient, FieldError, FieldId, NotificationForm};

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Interpret a date/time input value.
///
/// Values carrying an offset are taken as is; bare `YYYY-MM-DDTHH:MM[:SS]`
/// values are local wall-clock time in `tz`. On a DST fold the earlier
/// instant is used; times skipped by a DST gap are rejected.
pub fn parse_local_datetime<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }

    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
}

/// Leading decimal digits of the input, as a port number
pub fn parse_smtp_port(value: &str) -> Option<u16> {
    let value = value.trim_start();
    let digits = value
        .strip_prefix('+')
        .unwrap_or(value)
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or_default();

    digits.parse().ok()
}

/// Assemble the outgoing draft from the current form values.
///
/// Only the active channel's inputs are read; the e-mail block is attached
/// for the e-mail channel alone.
pub fn build_draft<Tz: TimeZone>(
    form: &NotificationForm,
    tz: &Tz,
) -> Result<NotificationDraft, FieldError> {
    let notification_date = parse_local_datetime(form.value(FieldId::NotificationDate), tz)
        .ok_or_else(|| {
            FieldError::new(
                FieldId::NotificationDate,
                "Please enter a valid notification date",
            )
        })?;

    let recipient_id = resolve_recipient(form);

    let delivery = match form.channel() {
        Some(Channel::Telegram) => Delivery::Telegram { recipient_id },
        Some(Channel::Email) => Delivery::Email {
            recipient_id,
            config: email_config(form)?,
        },
        None => {
            return Err(FieldError::new(
                FieldId::Channel,
                "Please select a delivery channel",
            ))
        }
    };

    debug!(
        channel = %delivery.channel(),
        notification_date = %notification_date,
        "Draft assembled"
    );

    Ok(NotificationDraft::new(
        form.value(FieldId::Payload),
        notification_date,
        delivery,
    ))
}

fn email_config(form: &NotificationForm) -> Result<EmailConfig, FieldError> {
    let smtp_port = parse_smtp_port(form.value(FieldId::EmailSmtpPort)).ok_or_else(|| {
        FieldError::new(FieldId::EmailSmtpPort, "Please enter a valid SMTP port")
    })?;

    Ok(EmailConfig {
        subject: form.value(FieldId::EmailSubject).to_string(),
        from_name: form.value(FieldId::EmailFromName).to_string(),
        from_email: form.value(FieldId::EmailFromEmail).to_string(),
        smtp_host: form.value(FieldId::EmailSmtpHost).to_string(),
        smtp_port,
        username: form.value(FieldId::EmailUsername).to_string(),
        password: form.value(FieldId::EmailPassword).to_string(),
    })
}
