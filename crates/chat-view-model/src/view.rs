use crate::classifier::{
    accessible_title, classify, private_chat_enabled, sender_label, MenuSide, MessageVariant,
};
use crate::collaborators::{IdentityResolver, Localizer, PrivacyNoticeFormatter, TimestampFormatter};
use crate::disclosure::DisclosureState;
use crate::reactions::{summarize_with, OverflowPolicy, ReactionDetail, ReactionSummary};
use crate::types::ChatMessage;
use serde::Serialize;

/// Session facts the caller passes in for one derivation pass.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub local_participant_id: String,
    pub knocking: bool,
    pub show_display_name: bool,
    /// Verdict of the participant policy on private chat.
    pub private_chat_allowed: bool,
    pub overflow_policy: OverflowPolicy,
}

impl ViewContext {
    pub fn new(local_participant_id: impl Into<String>) -> Self {
        Self {
            local_participant_id: local_participant_id.into(),
            knocking: false,
            show_display_name: true,
            private_chat_allowed: true,
            overflow_policy: OverflowPolicy::default(),
        }
    }
}

pub struct Collaborators<'a> {
    pub localizer: &'a dyn Localizer,
    pub privacy_notice: &'a dyn PrivacyNoticeFormatter,
    pub timestamp: &'a dyn TimestampFormatter,
    pub identity: Option<&'a dyn IdentityResolver>,
}

/// Everything the presentation layer needs to draw one message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub message_id: String,
    pub variant: MessageVariant,
    pub menu_side: MenuSide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_label: Option<String>,
    pub accessible_title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_notice: Option<String>,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactions: Option<ReactionSummary>,
    pub disclosure: DisclosureState,
    pub show_menu: bool,
    pub show_react_button: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reaction_details: Vec<ReactionDetail>,
    pub private_chat_enabled: bool,
}

impl MessageView {
    pub fn build(
        message: &ChatMessage,
        context: &ViewContext,
        disclosure: DisclosureState,
        collaborators: &Collaborators<'_>,
    ) -> Self {
        let classification = classify(message, &context.local_participant_id, context.knocking);
        let summary = summarize_with(Some(&message.reactions), context.overflow_policy);

        let reaction_details = if disclosure.is_detail_open() {
            summary.details(collaborators.identity)
        } else {
            Vec::new()
        };

        MessageView {
            message_id: message.message_id.clone(),
            variant: classification.variant,
            menu_side: classification.menu_side,
            sender_label: context
                .show_display_name
                .then(|| sender_label(message, collaborators.localizer)),
            accessible_title: accessible_title(message, collaborators.localizer),
            text: message.message.clone(),
            privacy_notice: classification
                .show_privacy_notice
                .then(|| collaborators.privacy_notice.notice(message)),
            timestamp: collaborators.timestamp.format(message.timestamp),
            reactions: (!summary.is_empty()).then_some(summary),
            disclosure,
            show_menu: disclosure.is_hovered(),
            show_react_button: disclosure.is_hovered() && classification.show_react_button,
            reaction_details,
            private_chat_enabled: private_chat_enabled(message, context.private_chat_allowed),
        }
    }
}
