//! Interfaces to the collaborators that own identity, text formatting and
//! moderation transport, plus small default implementations.

use crate::quick_actions::ModerationCommand;
use crate::types::{
    ChatMessage, MessageType, LOBBY_NOTICE_KEY, PRIVATE_NOTICE_FROM_KEY, PRIVATE_NOTICE_TO_KEY,
};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::collections::HashMap;

/// Resolves participant ids to display names.
pub trait IdentityResolver {
    fn display_name(&self, participant_id: &str) -> Option<String>;
}

/// Produces the privacy notice text shown under private and lobby messages.
pub trait PrivacyNoticeFormatter {
    fn notice(&self, message: &ChatMessage) -> String;
}

pub trait TimestampFormatter {
    /// `timestamp` is milliseconds since the Unix epoch.
    fn format(&self, timestamp: u64) -> String;
}

pub trait Localizer {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;
}

/// Accepts moderation commands. Results are never reported back.
pub trait ModerationDispatch {
    fn dispatch(&mut self, participant_id: &str, command: ModerationCommand);
}

impl IdentityResolver for HashMap<String, String> {
    fn display_name(&self, participant_id: &str) -> Option<String> {
        self.get(participant_id).cloned()
    }
}

/// Records every dispatched command in order.
impl ModerationDispatch for Vec<(String, ModerationCommand)> {
    fn dispatch(&mut self, participant_id: &str, command: ModerationCommand) {
        self.push((participant_id.to_string(), command));
    }
}

/// Template table lookup. Unknown keys translate to the key itself.
///
/// Templates reference parameters as `{{name}}`.
#[derive(Debug, Clone, Default)]
pub struct KeyLocalizer {
    templates: HashMap<String, String>,
}

impl KeyLocalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(key.into(), template.into());
        self
    }
}

impl Localizer for KeyLocalizer {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.templates.get(key) else {
            return key.to_string();
        };
        params
            .iter()
            .fold(template.clone(), |text, (name, value)| {
                text.replace(&format!("{{{{{}}}}}", name), value)
            })
    }
}

/// Notice text built from localisation keys: lobby messages name the
/// recipient, private messages name the recipient when sent locally and the
/// sender otherwise.
pub struct DefaultPrivacyNotice<L> {
    localizer: L,
}

impl<L: Localizer> DefaultPrivacyNotice<L> {
    pub fn new(localizer: L) -> Self {
        Self { localizer }
    }
}

impl<L: Localizer> PrivacyNoticeFormatter for DefaultPrivacyNotice<L> {
    fn notice(&self, message: &ChatMessage) -> String {
        let recipient = message.recipient.as_deref().unwrap_or_default();
        if message.lobby_chat && !message.private_message {
            return self
                .localizer
                .translate(LOBBY_NOTICE_KEY, &[("recipient", recipient)]);
        }
        match message.message_type {
            MessageType::Local => self
                .localizer
                .translate(PRIVATE_NOTICE_TO_KEY, &[("recipient", recipient)]),
            _ => self
                .localizer
                .translate(PRIVATE_NOTICE_FROM_KEY, &[("sender", message.display_name.as_str())]),
        }
    }
}

/// `HH:MM` wall-clock time at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct ClockTimestampFormatter {
    offset: FixedOffset,
}

impl ClockTimestampFormatter {
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Falls back to UTC when the offset is out of range (more than a day).
    pub fn with_offset_minutes(minutes: i32) -> Self {
        match minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
        {
            Some(offset) => Self { offset },
            None => {
                tracing::warn!(minutes, "UTC offset out of range, using UTC");
                Self::utc()
            }
        }
    }
}

impl Default for ClockTimestampFormatter {
    fn default() -> Self {
        Self::utc()
    }
}

impl TimestampFormatter for ClockTimestampFormatter {
    fn format(&self, timestamp: u64) -> String {
        let Ok(millis) = i64::try_from(timestamp) else {
            return String::new();
        };
        match DateTime::from_timestamp_millis(millis) {
            Some(time) => time.with_timezone(&self.offset).format("%H:%M").to_string(),
            None => String::new(),
        }
    }
}
