use notifier_domain::notification::Channel;

use super::{FieldId, NotificationForm};

/// Value of the recipient input that belongs to the selected channel, or an
/// empty string when the selection is not a known channel
pub fn resolve_recipient(form: &NotificationForm) -> String {
    match form.channel() {
        Some(Channel::Telegram) => form.value(FieldId::TelegramRecipient).to_string(),
        Some(Channel::Email) => form.value(FieldId::EmailRecipient).to_string(),
        None => String::new(),
    }
}
