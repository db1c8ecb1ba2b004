//! Typed view-model of the create-notification form.
//!
//! Hosts bind their widgets to [`FieldId`]s and push values in; the
//! controllers in this module and in `services` only ever read and write this
//! structure, never the UI toolkit itself.

mod draft;
mod recipient;
mod validation;
mod visibility;

pub use draft::{build_draft, parse_local_datetime, parse_smtp_port};
pub use recipient::resolve_recipient;
pub use validation::{
    check_required_fields, validate_email_fields, FieldError, EMAIL_REQUIRED_FIELDS,
};
pub use visibility::toggle_channel_fields;

use serde::{Deserialize, Serialize};

use notifier_domain::notification::Channel;

/// Inputs of the form, named after the identifiers the page uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "desktop", derive(specta::Type))]
pub enum FieldId {
    #[serde(rename = "payload")]
    Payload,
    #[serde(rename = "notificationDate")]
    NotificationDate,
    #[serde(rename = "channel")]
    Channel,
    #[serde(rename = "telegramRecipient")]
    TelegramRecipient,
    #[serde(rename = "emailRecipient")]
    EmailRecipient,
    #[serde(rename = "emailSubject")]
    EmailSubject,
    #[serde(rename = "emailFromName")]
    EmailFromName,
    #[serde(rename = "emailFromEmail")]
    EmailFromEmail,
    #[serde(rename = "emailSMTPHost")]
    EmailSmtpHost,
    #[serde(rename = "emailSMTPPort")]
    EmailSmtpPort,
    #[serde(rename = "emailUsername")]
    EmailUsername,
    #[serde(rename = "emailPassword")]
    EmailPassword,
}

impl FieldId {
    pub const ALL: [FieldId; 12] = [
        FieldId::Payload,
        FieldId::NotificationDate,
        FieldId::Channel,
        FieldId::TelegramRecipient,
        FieldId::EmailRecipient,
        FieldId::EmailSubject,
        FieldId::EmailFromName,
        FieldId::EmailFromEmail,
        FieldId::EmailSmtpHost,
        FieldId::EmailSmtpPort,
        FieldId::EmailUsername,
        FieldId::EmailPassword,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Payload => "payload",
            FieldId::NotificationDate => "notificationDate",
            FieldId::Channel => "channel",
            FieldId::TelegramRecipient => "telegramRecipient",
            FieldId::EmailRecipient => "emailRecipient",
            FieldId::EmailSubject => "emailSubject",
            FieldId::EmailFromName => "emailFromName",
            FieldId::EmailFromEmail => "emailFromEmail",
            FieldId::EmailSmtpHost => "emailSMTPHost",
            FieldId::EmailSmtpPort => "emailSMTPPort",
            FieldId::EmailUsername => "emailUsername",
            FieldId::EmailPassword => "emailPassword",
        }
    }

    fn default_placeholder(&self) -> Option<&'static str> {
        match self {
            FieldId::Payload => Some("Message text"),
            FieldId::TelegramRecipient => Some("Telegram chat ID"),
            FieldId::EmailRecipient => Some("Recipient email"),
            FieldId::EmailSubject => Some("Subject"),
            FieldId::EmailFromName => Some("Sender name"),
            FieldId::EmailFromEmail => Some("Sender email"),
            FieldId::EmailSmtpHost => Some("SMTP host"),
            FieldId::EmailSmtpPort => Some("SMTP port"),
            FieldId::EmailUsername => Some("SMTP username"),
            FieldId::EmailPassword => Some("SMTP password"),
            FieldId::NotificationDate | FieldId::Channel => None,
        }
    }

    /// Required whatever the channel
    fn always_required(&self) -> bool {
        matches!(self, FieldId::Payload | FieldId::NotificationDate)
    }

    fn default_value(&self) -> &'static str {
        match self {
            FieldId::Channel => Channel::default().as_str(),
            _ => "",
        }
    }
}

/// Channel-specific block of inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "desktop", derive(specta::Type))]
#[serde(rename_all = "lowercase")]
pub enum FieldGroup {
    Telegram,
    Email,
}

impl FieldGroup {
    pub fn for_channel(channel: Channel) -> Self {
        match channel {
            Channel::Telegram => FieldGroup::Telegram,
            Channel::Email => FieldGroup::Email,
        }
    }

    /// Every input belonging to the group
    pub fn fields(&self) -> &'static [FieldId] {
        match self {
            FieldGroup::Telegram => &[FieldId::TelegramRecipient],
            FieldGroup::Email => &[
                FieldId::EmailRecipient,
                FieldId::EmailSubject,
                FieldId::EmailFromName,
                FieldId::EmailFromEmail,
                FieldId::EmailSmtpHost,
                FieldId::EmailSmtpPort,
                FieldId::EmailUsername,
                FieldId::EmailPassword,
            ],
        }
    }

    /// Inputs that must be filled while the group is active
    pub fn required_fields(&self) -> &'static [FieldId] {
        match self {
            FieldGroup::Telegram => &[FieldId::TelegramRecipient],
            FieldGroup::Email => &EMAIL_REQUIRED_FIELDS,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            FieldGroup::Telegram => FieldGroup::Email,
            FieldGroup::Email => FieldGroup::Telegram,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "desktop", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: FieldId,
    pub value: String,
    pub placeholder: Option<String>,
    pub required: bool,
}

impl FormField {
    fn new(id: FieldId) -> Self {
        Self {
            id,
            value: id.default_value().to_string(),
            placeholder: id.default_placeholder().map(str::to_string),
            required: id.always_required(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Name used in user-facing messages: the placeholder, else the identifier
    pub fn label(&self) -> &str {
        self.placeholder
            .as_deref()
            .filter(|placeholder| !placeholder.is_empty())
            .unwrap_or(self.id.as_str())
    }
}

/// Current content of one input, as sent by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "desktop", derive(specta::Type))]
pub struct FieldValue {
    pub field: FieldId,
    pub value: String,
}

impl FieldValue {
    pub fn new(field: FieldId, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Presentation state of the create form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "desktop", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct NotificationForm {
    fields: Vec<FormField>,
    visible_group: Option<FieldGroup>,
    focused: Option<FieldId>,
}

impl Default for NotificationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationForm {
    /// Fresh form as loaded, before the visibility controller has run
    pub fn new() -> Self {
        Self {
            fields: FieldId::ALL.iter().copied().map(FormField::new).collect(),
            visible_group: None,
            focused: None,
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, id: FieldId) -> &FormField {
        // `fields` always holds every id, in `FieldId::ALL` order
        &self.fields[Self::index(id)]
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut FormField {
        &mut self.fields[Self::index(id)]
    }

    fn index(id: FieldId) -> usize {
        FieldId::ALL
            .iter()
            .position(|candidate| *candidate == id)
            .unwrap_or_default()
    }

    pub fn value(&self, id: FieldId) -> &str {
        &self.field(id).value
    }

    pub fn set_value(&mut self, id: FieldId, value: impl Into<String>) {
        self.field_mut(id).value = value.into();
    }

    /// Take over a batch of input values.
    ///
    /// A changed channel selection re-runs the visibility controller so the
    /// required flags match the new group.
    pub fn apply_values(&mut self, values: &[FieldValue]) {
        let previous_channel = self.channel_selection().to_string();
        for FieldValue { field, value } in values {
            self.set_value(*field, value.as_str());
        }
        if self.channel_selection() != previous_channel {
            toggle_channel_fields(self);
        }
    }

    pub fn set_placeholder(&mut self, id: FieldId, placeholder: Option<String>) {
        self.field_mut(id).placeholder = placeholder;
    }

    /// Raw value of the channel selector
    pub fn channel_selection(&self) -> &str {
        self.value(FieldId::Channel)
    }

    /// Parsed channel selector, `None` when the value is not a known channel
    pub fn channel(&self) -> Option<Channel> {
        self.channel_selection().parse().ok()
    }

    pub fn select_channel(&mut self, selection: impl Into<String>) {
        self.set_value(FieldId::Channel, selection);
    }

    pub fn is_required(&self, id: FieldId) -> bool {
        self.field(id).required
    }

    pub(crate) fn set_required(&mut self, id: FieldId, required: bool) {
        self.field_mut(id).required = required;
    }

    pub fn visible_group(&self) -> Option<FieldGroup> {
        self.visible_group
    }

    pub fn is_group_visible(&self, group: FieldGroup) -> bool {
        self.visible_group == Some(group)
    }

    pub(crate) fn show_group(&mut self, group: FieldGroup) {
        self.visible_group = Some(group);
    }

    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    pub fn focus(&mut self, id: FieldId) {
        self.focused = Some(id);
    }

    /// Restore every value to its initial state.
    ///
    /// Like a native form reset, required flags and group visibility are left
    /// alone; run the visibility controller afterwards.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.id.default_value().to_string();
        }
        self.focused = None;
    }
}
